//! Series actions, one type-frame per series datatype.
//!
//! Each action is written once over [`SeriesType`] and instantiated per
//! datatype, so `first` on a block and `first` on a string are distinct
//! native functions living in distinct type-frames: a block yields its
//! element, a string yields a one-character string, a binary yields an
//! integer byte.

use rook_ir::Name;
use rook_value::errors::{empty_series, expect_arg};
use rook_value::{
    CallArgs, EvalError, EvalResult, Executor, FunctionValue, NativeFn, Series, TypeKind, Value,
};

use super::action_spec;

/// How one series datatype stores and presents its elements.
pub(crate) trait SeriesType {
    type Elem: Clone;

    const KIND: TypeKind;

    fn series(value: &Value) -> Option<Series<Self::Elem>>;

    fn wrap(series: Series<Self::Elem>) -> Value;

    /// An element as a script value.
    fn element(elem: Self::Elem) -> Value;

    /// Elements to add for `value`; `only` keeps a block as one element.
    fn elements(value: Value, only: bool, origin: Name) -> Result<Vec<Self::Elem>, EvalError>;
}

pub(crate) struct BlockType;
pub(crate) struct ParenType;
pub(crate) struct StringType;
pub(crate) struct BinaryType;

fn splice(value: Value, only: bool) -> Vec<Value> {
    match value {
        Value::Block(items) if !only => items.to_vec(),
        other => vec![other],
    }
}

impl SeriesType for BlockType {
    type Elem = Value;

    const KIND: TypeKind = TypeKind::Block;

    fn series(value: &Value) -> Option<Series<Value>> {
        match value {
            Value::Block(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn wrap(series: Series<Value>) -> Value {
        Value::Block(series)
    }

    fn element(elem: Value) -> Value {
        elem
    }

    fn elements(value: Value, only: bool, _: Name) -> Result<Vec<Value>, EvalError> {
        Ok(splice(value, only))
    }
}

impl SeriesType for ParenType {
    type Elem = Value;

    const KIND: TypeKind = TypeKind::Paren;

    fn series(value: &Value) -> Option<Series<Value>> {
        match value {
            Value::Paren(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn wrap(series: Series<Value>) -> Value {
        Value::Paren(series)
    }

    fn element(elem: Value) -> Value {
        elem
    }

    fn elements(value: Value, only: bool, _: Name) -> Result<Vec<Value>, EvalError> {
        Ok(splice(value, only))
    }
}

impl SeriesType for StringType {
    type Elem = char;

    const KIND: TypeKind = TypeKind::String;

    fn series(value: &Value) -> Option<Series<char>> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn wrap(series: Series<char>) -> Value {
        Value::String(series)
    }

    fn element(elem: char) -> Value {
        Value::String(Series::new(vec![elem]))
    }

    fn elements(value: Value, _: bool, _: Name) -> Result<Vec<char>, EvalError> {
        Ok(match value {
            Value::String(s) => s.to_vec(),
            Value::Binary(b) => String::from_utf8_lossy(&b.to_vec()).chars().collect(),
            other => other.form().chars().collect(),
        })
    }
}

impl SeriesType for BinaryType {
    type Elem = u8;

    const KIND: TypeKind = TypeKind::Binary;

    fn series(value: &Value) -> Option<Series<u8>> {
        match value {
            Value::Binary(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn wrap(series: Series<u8>) -> Value {
        Value::Binary(series)
    }

    fn element(elem: u8) -> Value {
        Value::Integer(i64::from(elem))
    }

    fn elements(value: Value, _: bool, origin: Name) -> Result<Vec<u8>, EvalError> {
        match value {
            Value::Binary(b) => Ok(b.to_vec()),
            Value::String(s) => {
                let text: String = s.with_items(|chars| chars.iter().collect());
                Ok(text.into_bytes())
            }
            Value::Integer(n) => u8::try_from(n)
                .map(|byte| vec![byte])
                .map_err(|_| expect_arg(origin, "integer 0..255", TypeKind::Integer)),
            other => Err(expect_arg(origin, "binary!, string! or integer!", other.kind())),
        }
    }
}

/// The type-frame contents for `S`.
pub(crate) fn type_frame<S: SeriesType>() -> Vec<(Name, FunctionValue)> {
    let natives: [(&str, NativeFn); 12] = [
        ("first", first::<S>),
        ("next", next::<S>),
        ("back", back::<S>),
        ("skip", skip::<S>),
        ("copy", copy::<S>),
        ("append", append::<S>),
        ("insert", insert::<S>),
        ("remove", remove::<S>),
        ("length", length::<S>),
        ("head", head::<S>),
        ("tail", tail::<S>),
        ("pick", pick::<S>),
    ];
    natives
        .into_iter()
        .map(|(name, native)| {
            let implementation = FunctionValue::native(action_spec(name), native);
            (Name::intern(name), implementation)
        })
        .collect()
}

fn target<S: SeriesType>(args: &CallArgs, action: &str) -> Result<Series<S::Elem>, EvalError> {
    let value = args.value(0);
    S::series(&value)
        .ok_or_else(|| expect_arg(Name::intern(action), S::KIND.name(), value.kind()))
}

fn integer(value: &Value, action: &str) -> Result<i64, EvalError> {
    match value {
        Value::Integer(n) => Ok(*n),
        other => Err(expect_arg(Name::intern(action), "integer!", other.kind())),
    }
}

/// `--part` length, if given.
fn part(args: &CallArgs, action: &str) -> Result<Option<usize>, EvalError> {
    args.option("part")
        .map(|value| integer(value, action).map(|n| usize::try_from(n).unwrap_or(0)))
        .transpose()
}

fn first<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    target::<S>(&args, "first")?
        .first()
        .map(S::element)
        .ok_or_else(|| empty_series(Name::intern("first")))
}

fn next<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(S::wrap(target::<S>(&args, "next")?.next()))
}

fn back<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(S::wrap(target::<S>(&args, "back")?.back()))
}

fn skip<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "skip")?;
    let offset = integer(&args.value(1), "skip")?;
    Ok(S::wrap(series.skip(offset)))
}

fn copy<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "copy")?;
    Ok(S::wrap(series.copy(part(&args, "copy")?)))
}

fn append<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "append")?;
    let items = S::elements(args.value(1), args.has("only"), Name::intern("append"))?;
    Ok(S::wrap(series.append(items)))
}

fn insert<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "insert")?;
    let items = S::elements(args.value(1), args.has("only"), Name::intern("insert"))?;
    Ok(S::wrap(series.insert(items)))
}

fn remove<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "remove")?;
    let count = part(&args, "remove")?.unwrap_or(1);
    Ok(S::wrap(series.remove(count)))
}

fn length<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let len = target::<S>(&args, "length")?.len();
    Ok(Value::Integer(i64::try_from(len).unwrap_or(i64::MAX)))
}

fn head<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(S::wrap(target::<S>(&args, "head")?.head()))
}

fn tail<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    Ok(S::wrap(target::<S>(&args, "tail")?.tail()))
}

/// 1-based element relative to the cursor; `none` outside the series.
fn pick<S: SeriesType>(_: &mut dyn Executor, args: CallArgs) -> EvalResult {
    let series = target::<S>(&args, "pick")?;
    let index = integer(&args.value(1), "pick")?;
    Ok(usize::try_from(index)
        .ok()
        .and_then(|at| series.pick(at))
        .map_or(Value::None, S::element))
}
