//! Function and action invocation.

use rook_ir::Name;
use rook_value::errors::{action_no_impl, arg_count, bad_refine, expect_arg, need_value};
use rook_value::{
    ActionValue, CallArgs, EvalError, EvalResult, FunctionBody, FunctionValue, ParamSpec, TypeKind,
    UserBody, Value,
};

use super::{Cursor, Evaluator};
use crate::frame::Frame;

impl Evaluator {
    /// Invoke `callee`, collecting its arguments from the pending values.
    pub(crate) fn invoke(
        &mut self,
        callee: &Value,
        origin: Name,
        cursor: &mut Cursor<'_>,
    ) -> EvalResult {
        let args = match callee {
            Value::Function(f) => self.collect_args(f.spec(), origin, cursor)?,
            Value::Action(a) => self.collect_args(a.spec(), origin, cursor)?,
            other => return Ok(other.clone()),
        };
        self.call_value(callee, origin, args)
    }

    /// Gather positional arguments and refinements for a call.
    ///
    /// Evaluated parameters take one full expression each; raw parameters
    /// take the next value as-is. Refinement tokens may appear before any
    /// positional and are consumed if they directly follow the last one.
    fn collect_args(
        &mut self,
        spec: &ParamSpec,
        origin: Name,
        cursor: &mut Cursor<'_>,
    ) -> Result<CallArgs, EvalError> {
        let mut positional = Vec::with_capacity(spec.arity());
        let mut refinements = Vec::new();
        for param in spec.params() {
            self.collect_refinements(spec, origin, cursor, &mut refinements, true)?;
            if cursor.at_end() {
                return Err(arg_count(origin, spec.arity(), positional.len()));
            }
            let value = if param.evaluate {
                self.evaluate_next(cursor)?
            } else {
                cursor.advance().cloned().unwrap_or(Value::None)
            };
            positional.push(value);
        }
        self.collect_refinements(spec, origin, cursor, &mut refinements, false)?;
        let mut args = CallArgs::new(positional);
        for (name, value) in refinements {
            args.set_refinement(name, value);
        }
        Ok(args)
    }

    /// Consume refinement tokens at the cursor. With `strict`, a token the
    /// callee does not declare is an error; otherwise it is left in place.
    fn collect_refinements(
        &mut self,
        spec: &ParamSpec,
        origin: Name,
        cursor: &mut Cursor<'_>,
        out: &mut Vec<(Name, Value)>,
        strict: bool,
    ) -> Result<(), EvalError> {
        while let Some(Value::Word(token)) = cursor.peek() {
            let Some(name) = token.refinement() else {
                break;
            };
            let Some(declared) = spec.refinement(name).copied() else {
                if strict {
                    return Err(bad_refine(origin, name));
                }
                break;
            };
            cursor.advance();
            let value = if declared.value.is_some() {
                if cursor.at_end() {
                    return Err(need_value(*token));
                }
                self.evaluate_next(cursor)?
            } else {
                Value::Logic(true)
            };
            out.push((name, value));
        }
        Ok(())
    }

    /// Call a function or action with collected arguments.
    pub(crate) fn call_value(&mut self, callee: &Value, origin: Name, args: CallArgs) -> EvalResult {
        match callee {
            Value::Function(f) => self.call_function(f, origin, args),
            Value::Action(a) => self.dispatch_action(a, args),
            other => Err(expect_arg(origin, "function!", other.kind())),
        }
    }

    fn call_function(&mut self, f: &FunctionValue, origin: Name, args: CallArgs) -> EvalResult {
        match f.body() {
            FunctionBody::Native(native) => {
                let _span = tracing::debug_span!("native", function = %origin).entered();
                native(self, args)
            }
            FunctionBody::User(body) => self.call_user(f.spec(), body, origin, args),
        }
    }

    /// Run a user function body in a fresh call frame whose parent is the
    /// definition frame.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %origin))]
    fn call_user(
        &mut self,
        spec: &ParamSpec,
        body: &UserBody,
        origin: Name,
        args: CallArgs,
    ) -> EvalResult {
        let mut frame = Frame::call(
            body.definition.clone(),
            self.current,
            origin,
            body.captured.clone(),
        );
        for (param, value) in spec.params().iter().zip(args.positional()) {
            frame.bind(param.name, value.clone());
        }
        for refinement in spec.refinements() {
            let given = args.refinement(refinement.name);
            frame.bind(refinement.name, Value::Logic(given.is_some()));
            if let Some(value_name) = refinement.value {
                frame.bind(value_name, given.cloned().unwrap_or(Value::None));
            }
        }
        let handle = self.stack.push(frame)?;
        let result = self.evaluate_in(handle.id(), &body.body.to_vec());
        // The frame outlives the call only if a closure or object took a
        // reference to it.
        drop(handle);
        self.stack.reclaim();
        result
    }

    /// Resolve an action through the type-frame of its first argument's
    /// datatype and call the implementation.
    #[tracing::instrument(level = "debug", skip_all, fields(action = %action.name()))]
    fn dispatch_action(&mut self, action: &ActionValue, args: CallArgs) -> EvalResult {
        let kind = args.positional().first().map_or(TypeKind::None, Value::kind);
        let Some(implementation) = self.registry.resolve(kind, action.name()).cloned() else {
            return Err(action_no_impl(action.name(), kind));
        };
        tracing::trace!(%kind, "action resolved");
        self.call_value(&implementation, action.name(), args)
    }
}
