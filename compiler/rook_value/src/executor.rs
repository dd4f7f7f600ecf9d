//! Callback seam from native code into the evaluator.
//!
//! Native functions live outside the evaluator but need to evaluate blocks,
//! create functions and objects, and read or write bindings. They receive a
//! `&mut dyn Executor` instead of the concrete evaluator, which keeps this
//! crate free of any dependency on `rook_eval`.

use rook_ir::Name;

use crate::errors::{EvalError, EvalResult};
use crate::function::CallArgs;
use crate::object::ObjectValue;
use crate::series::Series;
use crate::value::Value;

/// Evaluator services available to native functions.
pub trait Executor {
    /// Evaluate `block` as a sequence in the current frame.
    fn do_series(&mut self, block: &Series<Value>) -> EvalResult;

    /// Create a user function closing over the current frame.
    fn make_function(&mut self, spec: &Series<Value>, body: &Series<Value>) -> EvalResult;

    /// Create an object whose fields are `prototype`'s (if any) followed by
    /// the set-words of `body`, then run `body` inside it.
    fn make_object(
        &mut self,
        prototype: Option<ObjectValue>,
        body: &Series<Value>,
    ) -> EvalResult;

    /// Read `name` through the full frame chain without invoking it.
    fn get_word(&mut self, name: Name) -> EvalResult;

    /// Overwrite the nearest binding of `name` along the full chain, or bind
    /// it in the root frame.
    fn set_dynamic(&mut self, name: Name, value: Value) -> Result<(), EvalError>;

    /// Call `callee` with already-evaluated arguments.
    fn apply(&mut self, callee: &Value, args: CallArgs) -> EvalResult;
}
