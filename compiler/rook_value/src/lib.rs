//! Rook Value - runtime values and errors for the Rook interpreter.
//!
//! This crate defines everything a script can hold or produce:
//! - `Value`: the closed sum type over scalars, words, series, functions,
//!   actions, objects, paths, datatypes and ports
//! - `Series<T>`: shared, cursor-carrying storage behind strings, binaries,
//!   blocks and parens
//! - `Decimal`: scaled decimal limited to 34 significant digits
//! - `EvalError`: the structured runtime error (category, ID, arguments,
//!   Near and Where context)
//! - `FrameRef`: a counted reference that keeps a stack frame alive
//! - `Executor`: the seam through which native functions call back into the
//!   evaluator without this crate depending on it
//!
//! Every value is built through a constructor on its type; fields that carry
//! invariants (series cursors, decimal scale, path heads) are private.

mod datatype;
mod decimal;
pub mod errors;
mod executor;
mod frame_ref;
mod function;
mod object;
mod path;
mod port;
mod series;
mod shared;
mod value;

pub use datatype::TypeKind;
pub use decimal::{Decimal, MAX_DIGITS};
pub use errors::{
    ErrorCategory, ErrorId, EvalError, EvalResult, NearContext, WhereContext,
};
pub use executor::Executor;
pub use frame_ref::{FrameRef, ReleaseQueue, WeakFrameRef};
pub use function::{
    ActionValue, CallArgs, FunctionBody, FunctionValue, NativeFn, Param, ParamSpec,
    RefinementSpec, UserBody,
};
pub use object::ObjectValue;
pub use path::{Path, Segment};
pub use port::PortHandle;
pub use series::Series;
pub use shared::Shared;
pub use value::Value;

pub use rook_ir::{FrameId, Name, Span};
