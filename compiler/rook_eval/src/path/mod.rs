//! Path traversal and assignment.
//!
//! `obj.field`, `data.2` and `data.(expr)` walk from the value bound to the
//! head word through one segment at a time. Computed segments are resolved
//! to a [`Step`] exactly once per operation: a set-path resolves all of them
//! (left to right) before evaluating the assigned value, then navigates and
//! writes using the resolved steps only.

use rook_ir::Name;
use rook_value::errors::{
    expect_arg, invalid_path, need_value, no_such_field, none_path, out_of_bounds,
};
use rook_value::{EvalError, EvalResult, Path, Segment, Series, Value};

use crate::evaluator::{Cursor, Evaluator};

/// A segment after evaluation.
#[derive(Clone, Debug, PartialEq)]
enum Step {
    Field(Name),
    Index(i64),
}

impl Step {
    fn to_value(&self) -> Value {
        match self {
            Step::Field(name) => Value::Word(*name),
            Step::Index(i) => Value::Integer(*i),
        }
    }
}

/// Read a path. With a cursor (a plain `Path`), a function or action at the
/// end is invoked with the pending values; without one (`GetPath`) it is
/// returned as-is.
pub(crate) fn read(ev: &mut Evaluator, path: &Path, cursor: Option<&mut Cursor<'_>>) -> EvalResult {
    let mut current = ev.lookup(path.base())?;
    for segment in path.rest() {
        let step = resolve(ev, segment, &current)?;
        current = select(ev, &current, &step)?;
    }
    match cursor {
        Some(cursor) if current.is_callable() => ev.invoke(&current, path.last_word(), cursor),
        _ => Ok(current),
    }
}

/// Assign through a path and return the assigned value.
pub(crate) fn write(ev: &mut Evaluator, path: &Path, cursor: &mut Cursor<'_>) -> EvalResult {
    let mut steps = Vec::with_capacity(path.rest().len());
    for segment in path.rest() {
        steps.push(resolve_static(ev, segment)?);
    }
    if cursor.at_end() {
        return Err(need_value(path.last_word()));
    }
    let value = ev.evaluate_next(cursor)?;

    let Some((last, inner)) = steps.split_last() else {
        ev.assign(path.base(), value.clone())?;
        return Ok(value);
    };
    let mut container = ev.lookup(path.base())?;
    for step in inner {
        container = select(ev, &container, step)?;
    }
    store(ev, &container, last, value.clone())?;
    Ok(value)
}

/// Resolve a segment while reading: the container is known, so a bad
/// computed result can name it in the error.
fn resolve(ev: &mut Evaluator, segment: &Segment, container: &Value) -> Result<Step, EvalError> {
    match segment {
        Segment::Eval(block) => {
            let result = ev.evaluate_sequence(&block.to_vec())?;
            classify(result, container)
        }
        other => resolve_static(ev, other),
    }
}

/// Resolve a segment without a container in hand (set-path pre-pass).
fn resolve_static(ev: &mut Evaluator, segment: &Segment) -> Result<Step, EvalError> {
    match segment {
        Segment::Word(name) => Ok(Step::Field(*name)),
        Segment::Index(index) => Ok(Step::Index(i64::try_from(index.get()).unwrap_or(i64::MAX))),
        Segment::Eval(block) => {
            let result = ev.evaluate_sequence(&block.to_vec())?;
            classify(result, &Value::None)
        }
    }
}

/// Words and strings address fields, integers address positions.
fn classify(result: Value, container: &Value) -> Result<Step, EvalError> {
    match result {
        Value::Word(name) | Value::LitWord(name) => Ok(Step::Field(name)),
        Value::String(s) => {
            let text: String = s.with_items(|chars| chars.iter().collect());
            Ok(Step::Field(Name::intern(&text)))
        }
        Value::Integer(i) => Ok(Step::Index(i)),
        other => Err(invalid_path(other, container.kind())),
    }
}

/// Convert a 1-based step index to a position, failing on non-positive.
fn position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i > 0)
        .ok_or_else(|| out_of_bounds(index, len))
}

fn pick<T: Clone>(series: &Series<T>, index: i64, wrap: impl FnOnce(T) -> Value) -> EvalResult {
    let at = position(index, series.len())?;
    series
        .pick(at)
        .map(wrap)
        .ok_or_else(|| out_of_bounds(index, series.len()))
}

/// One traversal step.
fn select(ev: &Evaluator, current: &Value, step: &Step) -> EvalResult {
    match (current, step) {
        (Value::None, _) => Err(none_path(step.to_value())),
        (Value::Object(obj), Step::Field(name)) => ev
            .frame(obj.frame())?
            .get(*name)
            .cloned()
            .ok_or_else(|| no_such_field(*name)),
        (Value::Block(s) | Value::Paren(s), Step::Index(i)) => pick(s, *i, |v| v),
        (Value::String(s), Step::Index(i)) => pick(s, *i, |c| Value::string(&c.to_string())),
        (Value::Binary(s), Step::Index(i)) => pick(s, *i, |b| Value::Integer(i64::from(b))),
        (other, step) => Err(invalid_path(step.to_value(), other.kind())),
    }
}

/// Write `value` at the final step.
fn store(ev: &mut Evaluator, container: &Value, step: &Step, value: Value) -> Result<(), EvalError> {
    let origin = Name::intern("set-path");
    match (container, step) {
        (Value::None, _) => Err(none_path(step.to_value())),
        (Value::Object(obj), Step::Field(name)) => {
            let frame = obj.frame();
            if !ev.frame(frame)?.contains(*name) {
                return Err(no_such_field(*name));
            }
            ev.bind_field(frame, *name, value)
        }
        (Value::Block(s) | Value::Paren(s), Step::Index(i)) => poke(s, *i, value),
        (Value::String(s), Step::Index(i)) => {
            let c = match &value {
                Value::String(text) => text.first(),
                _ => None,
            }
            .ok_or_else(|| expect_arg(origin, "char string", value.kind()))?;
            poke(s, *i, c)
        }
        (Value::Binary(s), Step::Index(i)) => {
            let byte = match value {
                Value::Integer(n) => u8::try_from(n).ok(),
                _ => None,
            }
            .ok_or_else(|| expect_arg(origin, "integer 0..255", value.kind()))?;
            poke(s, *i, byte)
        }
        (other, step) => Err(invalid_path(step.to_value(), other.kind())),
    }
}

fn poke<T: Clone>(series: &Series<T>, index: i64, value: T) -> Result<(), EvalError> {
    let at = position(index, series.len())?;
    if series.poke(at, value) {
        Ok(())
    } else {
        Err(out_of_bounds(index, series.len()))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
