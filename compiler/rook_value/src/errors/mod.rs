//! Structured runtime errors.
//!
//! Every failure in the interpreter is an [`EvalError`]: a coarse
//! [`ErrorCategory`], a stable symbolic [`ErrorId`], up to three argument
//! values, a message rendered from the ID's template, and optional Near /
//! Where context attached by the evaluator as the error unwinds.
//!
//! Errors are built only through the `#[cold]` factory functions in this
//! module (e.g. `no_value(name)`); nothing else constructs `EvalError` by
//! field literal.

use std::fmt;

use rook_ir::{FrameId, Name, Span};
use smallvec::SmallVec;

use crate::datatype::TypeKind;
use crate::decimal::MAX_DIGITS;
use crate::port::PortHandle;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Loop control signal. Consumed by the loop that raised it.
    Throw,
    /// Malformed input.
    Syntax,
    /// Bad script: unbound words, wrong arguments, path and series misuse.
    Script,
    /// Numeric domain violations.
    Math,
    /// I/O and sandbox boundary failures on ports.
    Access,
    /// Resource exhaustion and interpreter invariants.
    Internal,
}

impl ErrorCategory {
    /// Report heading, e.g. `Script error`.
    pub const fn heading(self) -> &'static str {
        match self {
            ErrorCategory::Throw => "Throw",
            ErrorCategory::Syntax => "Syntax error",
            ErrorCategory::Script => "Script error",
            ErrorCategory::Math => "Math error",
            ErrorCategory::Access => "Access error",
            ErrorCategory::Internal => "Internal error",
        }
    }
}

/// Stable error identifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorId {
    // Throw
    Break,
    Continue,
    // Syntax
    InvalidSyntax,
    // Script
    NoValue,
    NeedValue,
    ArgCount,
    ExpectArg,
    BadFuncDef,
    BadRefine,
    ActionNoImpl,
    PathEvalBase,
    NonePath,
    NoSuchField,
    InvalidPath,
    OutOfBounds,
    EmptySeries,
    NoLoop,
    // Math
    ZeroDivide,
    Overflow,
    PrecisionOverflow,
    // Access
    PortAccess,
    // Internal
    StackOverflow,
    StaleFrame,
}

impl ErrorId {
    /// The category this ID belongs to.
    pub const fn category(self) -> ErrorCategory {
        match self {
            ErrorId::Break | ErrorId::Continue => ErrorCategory::Throw,
            ErrorId::InvalidSyntax => ErrorCategory::Syntax,
            ErrorId::NoValue
            | ErrorId::NeedValue
            | ErrorId::ArgCount
            | ErrorId::ExpectArg
            | ErrorId::BadFuncDef
            | ErrorId::BadRefine
            | ErrorId::ActionNoImpl
            | ErrorId::PathEvalBase
            | ErrorId::NonePath
            | ErrorId::NoSuchField
            | ErrorId::InvalidPath
            | ErrorId::OutOfBounds
            | ErrorId::EmptySeries
            | ErrorId::NoLoop => ErrorCategory::Script,
            ErrorId::ZeroDivide | ErrorId::Overflow | ErrorId::PrecisionOverflow => {
                ErrorCategory::Math
            }
            ErrorId::PortAccess => ErrorCategory::Access,
            ErrorId::StackOverflow | ErrorId::StaleFrame => ErrorCategory::Internal,
        }
    }

    /// Stable symbolic spelling, e.g. `no-value`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorId::Break => "break",
            ErrorId::Continue => "continue",
            ErrorId::InvalidSyntax => "invalid",
            ErrorId::NoValue => "no-value",
            ErrorId::NeedValue => "need-value",
            ErrorId::ArgCount => "arg-count",
            ErrorId::ExpectArg => "expect-arg",
            ErrorId::BadFuncDef => "bad-func-def",
            ErrorId::BadRefine => "bad-refine",
            ErrorId::ActionNoImpl => "action-no-impl",
            ErrorId::PathEvalBase => "path-eval-base",
            ErrorId::NonePath => "none-path",
            ErrorId::NoSuchField => "no-such-field",
            ErrorId::InvalidPath => "invalid-path",
            ErrorId::OutOfBounds => "out-of-bounds",
            ErrorId::EmptySeries => "empty-series",
            ErrorId::NoLoop => "no-loop",
            ErrorId::ZeroDivide => "zero-divide",
            ErrorId::Overflow => "overflow",
            ErrorId::PrecisionOverflow => "precision-overflow",
            ErrorId::PortAccess => "port-access",
            ErrorId::StackOverflow => "stack-overflow",
            ErrorId::StaleFrame => "stale-frame",
        }
    }

    /// Message template; `:arg1`..`:arg3` are replaced by the molded arguments.
    pub const fn template(self) -> &'static str {
        match self {
            ErrorId::Break => "break used outside of a loop body",
            ErrorId::Continue => "continue used outside of a loop body",
            ErrorId::InvalidSyntax => "invalid :arg1 -- :arg2",
            ErrorId::NoValue => ":arg1 has no value",
            ErrorId::NeedValue => ":arg1 needs a value",
            ErrorId::ArgCount => ":arg1 expects :arg2 arguments, got :arg3",
            ErrorId::ExpectArg => ":arg1 expected :arg2, got :arg3",
            ErrorId::BadFuncDef => "invalid function spec at :arg1",
            ErrorId::BadRefine => ":arg1 has no refinement :arg2",
            ErrorId::ActionNoImpl => ":arg1 has no implementation for :arg2",
            ErrorId::PathEvalBase => "path must start with a word, not :arg1",
            ErrorId::NonePath => "cannot traverse none at :arg1",
            ErrorId::NoSuchField => "object has no field :arg1",
            ErrorId::InvalidPath => "cannot use :arg1 in a path over :arg2",
            ErrorId::OutOfBounds => "index :arg1 is out of bounds for length :arg2",
            ErrorId::EmptySeries => "cannot take :arg1 of an empty series",
            ErrorId::NoLoop => ":arg1 used outside of a loop",
            ErrorId::ZeroDivide => "attempt to divide by zero",
            ErrorId::Overflow => "math or number overflow in :arg1",
            ErrorId::PrecisionOverflow => "decimal needs :arg1 significant digits, limit is :arg2",
            ErrorId::PortAccess => "cannot access :arg1: :arg2",
            ErrorId::StackOverflow => "evaluation exceeded the limit of :arg1 :arg2",
            ErrorId::StaleFrame => "frame :arg1 is no longer live",
        }
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Windowed rendering of the expression that failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NearContext {
    text: String,
}

impl NearContext {
    /// Wrap an already-rendered window.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The rendered window.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for NearContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Names of the functions active when the error occurred, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WhereContext {
    frames: Vec<Name>,
}

impl WhereContext {
    /// Build from names ordered innermost first.
    pub fn new(frames: Vec<Name>) -> Self {
        Self { frames }
    }

    /// Function names, innermost first.
    pub fn frames(&self) -> &[Name] {
        &self.frames
    }

    /// Whether no function was active.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for WhereContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name.as_str())?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Coarse class.
    pub category: ErrorCategory,
    /// Stable identifier.
    pub id: ErrorId,
    /// Interpolation arguments (at most three).
    pub args: SmallVec<[Value; 3]>,
    /// Message rendered from `id.template()` and `args`.
    pub message: String,
    /// Window around the offending value, attached while unwinding.
    pub near: Option<NearContext>,
    /// Active call chain, attached while unwinding.
    pub where_context: Option<WhereContext>,
    /// Source location of the failing top-level expression.
    pub span: Option<Span>,
    /// Payload carried by a `break` signal.
    pub thrown: Option<Value>,
}

impl EvalError {
    fn from_id<const N: usize>(id: ErrorId, args: [Value; N]) -> Self {
        let args: SmallVec<[Value; 3]> = args.into_iter().take(3).collect();
        let message = render(id.template(), &args);
        Self {
            category: id.category(),
            id,
            args,
            message,
            near: None,
            where_context: None,
            span: None,
            thrown: None,
        }
    }

    /// Attach a Near window.
    #[must_use]
    pub fn with_near(mut self, near: NearContext) -> Self {
        self.near = Some(near);
        self
    }

    /// Attach a Where trace.
    #[must_use]
    pub fn with_where(mut self, trace: WhereContext) -> Self {
        self.where_context = Some(trace);
        self
    }

    /// Attach a source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Whether this is a loop-control signal rather than a failure.
    #[inline]
    pub fn is_throw(&self) -> bool {
        self.category == ErrorCategory::Throw
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "** {}: {}", self.category.heading(), self.message)?;
        if let Some(trace) = self.where_context.as_ref().filter(|t| !t.is_empty()) {
            write!(f, "\n** Where: {trace}")?;
        }
        if let Some(near) = &self.near {
            write!(f, "\n** Near: {near}")?;
        }
        if let Some(span) = self.span {
            write!(f, "\n** At: {span}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

fn render(template: &str, args: &[Value]) -> String {
    let mut message = template.to_string();
    for (i, arg) in args.iter().enumerate().rev() {
        message = message.replace(&format!(":arg{}", i + 1), &arg.form());
    }
    message
}

fn word(name: Name) -> Value {
    Value::word(name)
}

fn text(s: &str) -> Value {
    Value::string(s)
}

fn count(n: usize) -> Value {
    Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

// Throw signals

/// `break` signal, optionally carrying the loop's result.
#[cold]
pub fn break_signal(value: Option<Value>) -> EvalError {
    let mut err = EvalError::from_id(ErrorId::Break, []);
    err.thrown = value;
    err
}

/// `continue` signal.
#[cold]
pub fn continue_signal() -> EvalError {
    EvalError::from_id(ErrorId::Continue, [])
}

// Syntax

/// Malformed literal or token.
#[cold]
pub fn invalid_syntax(what: &str, source: &str) -> EvalError {
    EvalError::from_id(ErrorId::InvalidSyntax, [text(what), text(source)])
}

// Script: words and calls

/// Word is unbound along the whole frame chain.
#[cold]
pub fn no_value(name: Name) -> EvalError {
    EvalError::from_id(ErrorId::NoValue, [word(name)])
}

/// Set-word or option refinement at the end of its sequence.
#[cold]
pub fn need_value(name: Name) -> EvalError {
    EvalError::from_id(ErrorId::NeedValue, [word(name)])
}

/// Too few pending values for a call.
#[cold]
pub fn arg_count(callee: Name, expected: usize, got: usize) -> EvalError {
    EvalError::from_id(ErrorId::ArgCount, [word(callee), count(expected), count(got)])
}

/// Argument of the wrong type.
#[cold]
pub fn expect_arg(callee: Name, expected: &str, got: TypeKind) -> EvalError {
    EvalError::from_id(
        ErrorId::ExpectArg,
        [word(callee), text(expected), Value::Datatype(got)],
    )
}

/// Malformed function parameter spec.
#[cold]
pub fn bad_func_def(culprit: Value) -> EvalError {
    EvalError::from_id(ErrorId::BadFuncDef, [culprit])
}

/// Refinement token the callee does not declare.
#[cold]
pub fn bad_refine(callee: Name, refinement: Name) -> EvalError {
    let token = Name::intern(&format!("{}{refinement}", Name::REFINEMENT_PREFIX));
    EvalError::from_id(ErrorId::BadRefine, [word(callee), word(token)])
}

/// No implementation of `action` registered for `kind`.
#[cold]
pub fn action_no_impl(action: Name, kind: TypeKind) -> EvalError {
    EvalError::from_id(ErrorId::ActionNoImpl, [word(action), Value::Datatype(kind)])
}

/// Loop signal escaped every loop.
#[cold]
pub fn no_loop(signal: Name) -> EvalError {
    EvalError::from_id(ErrorId::NoLoop, [word(signal)])
}

// Script: paths and series

/// Path whose first segment is not a word.
#[cold]
pub fn path_eval_base(got: Value) -> EvalError {
    EvalError::from_id(ErrorId::PathEvalBase, [got])
}

/// Traversal reached `none` with segments remaining.
#[cold]
pub fn none_path(segment: Value) -> EvalError {
    EvalError::from_id(ErrorId::NonePath, [segment])
}

/// Object lacks the addressed field.
#[cold]
pub fn no_such_field(field: Name) -> EvalError {
    EvalError::from_id(ErrorId::NoSuchField, [word(field)])
}

/// Segment cannot address the current container.
#[cold]
pub fn invalid_path(segment: Value, container: TypeKind) -> EvalError {
    EvalError::from_id(ErrorId::InvalidPath, [segment, Value::Datatype(container)])
}

/// 1-based index outside the series.
#[cold]
pub fn out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::from_id(ErrorId::OutOfBounds, [Value::Integer(index), count(len)])
}

/// Element access at the tail.
#[cold]
pub fn empty_series(operation: Name) -> EvalError {
    EvalError::from_id(ErrorId::EmptySeries, [word(operation)])
}

// Math

/// Division by zero.
#[cold]
pub fn zero_divide() -> EvalError {
    EvalError::from_id(ErrorId::ZeroDivide, [])
}

/// Integer or mantissa overflow.
#[cold]
pub fn overflow(operation: &str) -> EvalError {
    EvalError::from_id(ErrorId::Overflow, [word(Name::intern(operation))])
}

/// Decimal would exceed the significant digit limit.
#[cold]
pub fn precision_overflow(digits: u32) -> EvalError {
    EvalError::from_id(
        ErrorId::PrecisionOverflow,
        [Value::Integer(i64::from(digits)), Value::Integer(i64::from(MAX_DIGITS))],
    )
}

// Access

/// Port operation refused at the I/O boundary.
#[cold]
pub fn port_access(port: &PortHandle, reason: &str) -> EvalError {
    EvalError::from_id(ErrorId::PortAccess, [Value::Port(port.clone()), text(reason)])
}

// Internal

/// Nesting depth limit reached.
#[cold]
pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::from_id(
        ErrorId::StackOverflow,
        [count(limit), word(Name::intern("nested evaluations"))],
    )
}

/// Live frame limit reached.
#[cold]
pub fn frame_limit(limit: usize) -> EvalError {
    EvalError::from_id(
        ErrorId::StackOverflow,
        [count(limit), word(Name::intern("live frames"))],
    )
}

/// Frame handle outlived its frame.
#[cold]
pub fn stale_frame(frame: FrameId) -> EvalError {
    EvalError::from_id(ErrorId::StaleFrame, [text(&frame.to_string())])
}
