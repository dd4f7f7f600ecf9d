//! The evaluator: turns a flat value sequence into results.
//!
//! `evaluate_sequence` runs `evaluate_next` until the cursor reaches the end
//! and returns the last result. `evaluate_next` dispatches on the kind of the
//! value under the cursor, then applies any infix operators that follow,
//! strictly left to right.
//!
//! # Frames
//!
//! The evaluator owns the frame [`Stack`]. `current` is the frame words are
//! resolved from; a call switches it to a fresh call frame whose lexical
//! parent is the function's definition frame, and restores it on return
//! (including on error).
//!
//! # Errors
//!
//! The innermost `evaluate_sequence` that sees a failure attaches Near and
//! Where context once; outer sequences pass it through unchanged. Loop
//! signals (`break`, `continue`) are never enriched.

mod call;
mod scoping;

use rook_ir::{FrameId, Name, Span};
use rook_value::errors::{arg_count, need_value, no_loop, stack_overflow};
use rook_value::{CallArgs, EvalError, EvalResult, Executor, ObjectValue, Series, Value};

use crate::config::EvalConfig;
use crate::diagnostics;
use crate::frame::Frame;
use crate::host_stack::ensure_sufficient_stack;
use crate::path;
use crate::registry::SharedTypeRegistry;
use crate::stack::Stack;

/// Position within a flat value sequence.
pub(crate) struct Cursor<'a> {
    items: &'a [Value],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(items: &'a [Value]) -> Self {
        Cursor { items, pos: 0 }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.items.len()
    }

    pub(crate) fn peek(&self) -> Option<&'a Value> {
        self.items.get(self.pos)
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Value> {
        let value = self.items.get(self.pos)?;
        self.pos += 1;
        Some(value)
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Values not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.pos)
    }
}

/// Tree-walking evaluator for one interpreter instance.
pub struct Evaluator {
    stack: Stack,
    registry: SharedTypeRegistry,
    config: EvalConfig,
    current: FrameId,
    depth: usize,
}

impl Evaluator {
    /// A bare evaluator: empty root frame, the given registry.
    pub(crate) fn with_parts(config: EvalConfig, registry: SharedTypeRegistry) -> Self {
        Evaluator {
            stack: Stack::new(config.max_frames),
            registry,
            config,
            current: FrameId::ROOT,
            depth: 0,
        }
    }

    /// Evaluate a top-level sequence in the root frame.
    ///
    /// A `break` or `continue` that escapes every loop is reported as
    /// `no-loop`.
    pub fn evaluate(&mut self, items: &[Value]) -> EvalResult {
        self.top_level(|ev| ev.evaluate_sequence(items))
    }

    /// Like [`evaluate`](Self::evaluate), with one source span per value.
    /// A failure carries the span of the top-level expression it happened in.
    pub fn evaluate_with_spans(&mut self, items: &[Value], spans: &[Span]) -> EvalResult {
        self.top_level(|ev| {
            let mut cursor = Cursor::new(items);
            let mut result = Value::None;
            while !cursor.at_end() {
                let start = cursor.position();
                match ev.evaluate_next(&mut cursor) {
                    Ok(value) => result = value,
                    Err(err) => {
                        let err = ev.enrich(err, items, start);
                        let end = cursor.position().max(start + 1);
                        return Err(match expression_span(spans, start, end) {
                            Some(span) => err.with_span(span),
                            None => err,
                        });
                    }
                }
            }
            Ok(result)
        })
    }

    fn top_level(&mut self, run: impl FnOnce(&mut Self) -> EvalResult) -> EvalResult {
        self.current = FrameId::ROOT;
        self.depth = 0;
        let result = run(self);
        self.current = FrameId::ROOT;
        self.stack.reclaim();
        match result {
            Err(err) if err.is_throw() => {
                tracing::warn!(signal = err.id.as_str(), "loop signal escaped to top level");
                Err(no_loop(Name::intern(err.id.as_str())))
            }
            other => other,
        }
    }

    /// Evaluate every value of `items` in the current frame; the result is
    /// the last value produced, or `none` for an empty sequence.
    pub(crate) fn evaluate_sequence(&mut self, items: &[Value]) -> EvalResult {
        let mut cursor = Cursor::new(items);
        let mut result = Value::None;
        while !cursor.at_end() {
            let start = cursor.position();
            result = self
                .evaluate_next(&mut cursor)
                .map_err(|err| self.enrich(err, items, start))?;
        }
        Ok(result)
    }

    /// Attach Near and Where once. Loop signals pass through untouched.
    fn enrich(&self, err: EvalError, items: &[Value], index: usize) -> EvalError {
        if err.is_throw() || err.near.is_some() {
            return err;
        }
        let trace = diagnostics::where_trace(&self.stack, self.current, self.config.where_depth);
        err.with_near(diagnostics::near(items, index)).with_where(trace)
    }

    /// Evaluate one expression: a single value, then any infix operators
    /// that follow it.
    pub(crate) fn evaluate_next(&mut self, cursor: &mut Cursor<'_>) -> EvalResult {
        if self.depth >= self.config.max_depth {
            return Err(stack_overflow(self.config.max_depth));
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| {
            let mut value = self.evaluate_single(cursor)?;
            while let Some((name, op)) = self.peek_infix(cursor) {
                cursor.advance();
                if cursor.at_end() {
                    return Err(arg_count(name, 2, 1));
                }
                let rhs = self.evaluate_single(cursor)?;
                value = self.call_value(&op, name, CallArgs::new(vec![value, rhs]))?;
            }
            Ok(value)
        });
        self.depth -= 1;
        result
    }

    fn evaluate_single(&mut self, cursor: &mut Cursor<'_>) -> EvalResult {
        let Some(value) = cursor.advance() else {
            return Ok(Value::None);
        };
        tracing::trace!(kind = %value.kind(), "evaluate");
        match value {
            Value::Word(name) => {
                let bound = self.lookup(*name)?;
                if bound.is_callable() {
                    self.invoke(&bound, *name, cursor)
                } else {
                    Ok(bound)
                }
            }
            Value::SetWord(name) => {
                if cursor.at_end() {
                    return Err(need_value(*name));
                }
                let result = self.evaluate_next(cursor)?;
                self.assign(*name, result.clone())?;
                Ok(result)
            }
            Value::GetWord(name) => self.lookup(*name),
            Value::Paren(items) => self.evaluate_sequence(&items.to_vec()),
            Value::Path(p) => path::read(self, p, Some(cursor)),
            Value::GetPath(p) => path::read(self, p, None),
            Value::SetPath(p) => path::write(self, p, cursor),
            Value::Function(_) => self.invoke(value, Name::intern("function"), cursor),
            Value::Action(action) => self.invoke(value, action.name(), cursor),
            // scalars, strings, binaries, blocks, lit-words, objects,
            // datatypes and ports evaluate to themselves
            other => Ok(other.clone()),
        }
    }

    /// The infix operator the cursor is looking at, if any.
    fn peek_infix(&self, cursor: &Cursor<'_>) -> Option<(Name, Value)> {
        let Some(Value::Word(name)) = cursor.peek() else {
            return None;
        };
        match self.stack.lookup(self.current, *name) {
            Ok(Some(op)) if matches!(&op, Value::Function(f) if f.is_infix()) => Some((*name, op)),
            _ => None,
        }
    }

    /// Overwrite an existing object field.
    pub(crate) fn bind_field(
        &mut self,
        frame: FrameId,
        name: Name,
        value: Value,
    ) -> Result<(), EvalError> {
        self.stack.bind(frame, name, value)
    }

    /// Evaluate `items` with `frame` current, restoring the previous frame
    /// afterwards.
    pub(crate) fn evaluate_in(&mut self, frame: FrameId, items: &[Value]) -> EvalResult {
        let saved = self.current;
        self.current = frame;
        let result = self.evaluate_sequence(items);
        self.current = saved;
        result
    }
}

/// Span covering `spans[start..end]`.
fn expression_span(spans: &[Span], start: usize, end: usize) -> Option<Span> {
    let first = *spans.get(start)?;
    let last = spans
        .get(start..end.min(spans.len()))
        .and_then(<[Span]>::last)
        .copied()
        .unwrap_or(first);
    Some(first.merge(last))
}

// Host-facing API: root bindings and introspection.
impl Evaluator {
    /// Bind `name` in the root frame (natives, actions, host globals).
    pub fn bind_global(&mut self, name: &str, value: Value) {
        // the root frame is permanent, so this cannot fail
        if let Ok(root) = self.stack.get_mut(FrameId::ROOT) {
            root.bind(Name::intern(name), value);
        }
    }

    /// Value bound to `name` in the root frame.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.stack
            .get(FrameId::ROOT)
            .ok()?
            .get(Name::intern(name))
            .cloned()
    }

    /// Frame words are currently resolved from.
    pub fn current_frame(&self) -> FrameId {
        self.current
    }

    /// Read access to one frame.
    pub fn frame(&self, id: FrameId) -> Result<&Frame, EvalError> {
        self.stack.get(id)
    }

    /// Fields of an object, in order.
    pub fn object_fields(&self, object: &ObjectValue) -> Result<Vec<(Name, Value)>, EvalError> {
        Ok(self
            .stack
            .get(object.frame())?
            .bindings()
            .map(|(name, value)| (name, value.clone()))
            .collect())
    }

    /// Active call frames, innermost first.
    pub fn call_chain(&self) -> Vec<FrameId> {
        diagnostics::active_calls(&self.stack, self.current)
    }

    /// The frame stack.
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// The type registry actions dispatch through.
    pub fn registry(&self) -> &SharedTypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }
}

impl Executor for Evaluator {
    fn do_series(&mut self, block: &Series<Value>) -> EvalResult {
        self.evaluate_sequence(&block.to_vec())
    }

    fn make_function(&mut self, spec: &Series<Value>, body: &Series<Value>) -> EvalResult {
        self.define_function(spec, body)
    }

    fn make_object(
        &mut self,
        prototype: Option<ObjectValue>,
        body: &Series<Value>,
    ) -> EvalResult {
        self.define_object(prototype, body)
    }

    fn get_word(&mut self, name: Name) -> EvalResult {
        self.lookup(name)
    }

    fn set_dynamic(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        let owner = self
            .stack
            .find_binding(self.current, name)?
            .unwrap_or(FrameId::ROOT);
        self.stack.bind(owner, name, value)
    }

    fn apply(&mut self, callee: &Value, args: CallArgs) -> EvalResult {
        let origin = match callee {
            Value::Action(action) => action.name(),
            _ => Name::intern("apply"),
        };
        self.call_value(callee, origin, args)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
