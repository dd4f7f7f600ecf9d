//! Functions, actions and their parameter specs.
//!
//! A function is a parameter spec plus a body: either a native
//! implementation (a plain `fn` pointer receiving an [`Executor`]) or a user
//! block closing over its definition frame. An action carries only a name
//! and a spec; its implementation is looked up per argument type at call
//! time.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use rook_ir::Name;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::errors::{bad_func_def, EvalError, EvalResult};
use crate::executor::Executor;
use crate::frame_ref::FrameRef;
use crate::series::Series;
use crate::value::Value;

/// Native implementation signature.
pub type NativeFn = fn(&mut dyn Executor, CallArgs) -> EvalResult;

/// A positional parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Param {
    /// Binding name inside the callee.
    pub name: Name,
    /// Whether the argument is evaluated before binding (`word`) or passed
    /// raw (`'word`).
    pub evaluate: bool,
}

/// A declared refinement: `--name` or `--name value`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RefinementSpec {
    /// Refinement name without the `--` prefix.
    pub name: Name,
    /// Name of the option parameter, if the refinement takes a value.
    pub value: Option<Name>,
}

/// Parameter list of a function or action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParamSpec {
    params: Vec<Param>,
    refinements: Vec<RefinementSpec>,
}

impl ParamSpec {
    /// Empty spec (no parameters, no refinements).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an evaluated positional parameter.
    #[must_use]
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: Name::intern(name),
            evaluate: true,
        });
        self
    }

    /// Add a positional parameter that receives its argument unevaluated.
    #[must_use]
    pub fn raw(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: Name::intern(name),
            evaluate: false,
        });
        self
    }

    /// Add a flag refinement.
    #[must_use]
    pub fn flag(mut self, name: &str) -> Self {
        self.refinements.push(RefinementSpec {
            name: Name::intern(name),
            value: None,
        });
        self
    }

    /// Add a refinement taking one evaluated value.
    #[must_use]
    pub fn option(mut self, name: &str, value: &str) -> Self {
        self.refinements.push(RefinementSpec {
            name: Name::intern(name),
            value: Some(Name::intern(value)),
        });
        self
    }

    /// Parse a spec block: `word`, `'word`, `--flag`, `--opt word`, with
    /// strings ignored. Positionals must come before refinements.
    pub fn parse(items: &[Value]) -> Result<Self, EvalError> {
        let mut spec = ParamSpec::new();
        let mut seen = FxHashSet::default();
        let mut iter = items.iter().peekable();
        while let Some(item) = iter.next() {
            match item {
                Value::String(_) => {}
                Value::Word(name) => {
                    if let Some(refinement) = name.refinement() {
                        let value = match iter.peek() {
                            Some(Value::Word(next)) if next.refinement().is_none() => {
                                let next = *next;
                                iter.next();
                                Some(next)
                            }
                            _ => None,
                        };
                        if !seen.insert(refinement) || value.is_some_and(|v| !seen.insert(v)) {
                            return Err(bad_func_def(item.clone()));
                        }
                        spec.refinements.push(RefinementSpec {
                            name: refinement,
                            value,
                        });
                    } else {
                        spec.push_positional(item, *name, true, &mut seen)?;
                    }
                }
                Value::LitWord(name) => spec.push_positional(item, *name, false, &mut seen)?,
                other => return Err(bad_func_def(other.clone())),
            }
        }
        Ok(spec)
    }

    fn push_positional(
        &mut self,
        item: &Value,
        name: Name,
        evaluate: bool,
        seen: &mut FxHashSet<Name>,
    ) -> Result<(), EvalError> {
        if !self.refinements.is_empty() || !seen.insert(name) {
            return Err(bad_func_def(item.clone()));
        }
        self.params.push(Param { name, evaluate });
        Ok(())
    }

    /// Positional parameters in order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Declared refinements in order.
    pub fn refinements(&self) -> &[RefinementSpec] {
        &self.refinements
    }

    /// Number of positional parameters.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Look up a declared refinement by bare name.
    pub fn refinement(&self, name: Name) -> Option<&RefinementSpec> {
        self.refinements.iter().find(|r| r.name == name)
    }
}

/// A user function's body and lexical environment.
#[derive(Clone, Debug)]
pub struct UserBody {
    /// Block evaluated on each call.
    pub body: Series<Value>,
    /// Frame the function was defined in; becomes each call-frame's parent.
    /// Holding it keeps that frame alive.
    pub definition: FrameRef,
    /// Names bound in non-root enclosing frames at definition time. A
    /// set-word naming one of these updates the enclosing binding.
    pub captured: Rc<FxHashSet<Name>>,
}

/// How a function is implemented.
#[derive(Clone)]
pub enum FunctionBody {
    Native(NativeFn),
    User(UserBody),
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Native(_) => f.write_str("Native"),
            FunctionBody::User(user) => f.debug_tuple("User").field(user).finish(),
        }
    }
}

#[derive(Debug)]
struct FunctionDef {
    spec: ParamSpec,
    body: FunctionBody,
    infix: bool,
}

/// A callable function value. Cloning shares the definition.
#[derive(Clone, Debug)]
pub struct FunctionValue(Rc<FunctionDef>);

impl FunctionValue {
    /// Native prefix function.
    pub fn native(spec: ParamSpec, f: NativeFn) -> Self {
        Self::build(spec, FunctionBody::Native(f), false)
    }

    /// Native infix operator: applied to the value before it and the value
    /// after it.
    pub fn native_infix(spec: ParamSpec, f: NativeFn) -> Self {
        Self::build(spec, FunctionBody::Native(f), true)
    }

    /// User function with a block body.
    pub fn user(spec: ParamSpec, body: UserBody) -> Self {
        Self::build(spec, FunctionBody::User(body), false)
    }

    fn build(spec: ParamSpec, body: FunctionBody, infix: bool) -> Self {
        FunctionValue(Rc::new(FunctionDef { spec, body, infix }))
    }

    /// Parameter spec.
    pub fn spec(&self) -> &ParamSpec {
        &self.0.spec
    }

    /// Implementation.
    pub fn body(&self) -> &FunctionBody {
        &self.0.body
    }

    /// Whether this function is applied infix.
    pub fn is_infix(&self) -> bool {
        self.0.infix
    }

    /// Whether both handles refer to the same definition.
    pub fn ptr_eq(&self, other: &FunctionValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of values sharing this definition.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Address of the shared definition.
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

#[derive(Debug)]
struct ActionDef {
    name: Name,
    spec: ParamSpec,
}

/// A polymorphic action: dispatched on the type of its first argument.
#[derive(Clone, Debug)]
pub struct ActionValue(Rc<ActionDef>);

impl ActionValue {
    pub fn new(name: Name, spec: ParamSpec) -> Self {
        ActionValue(Rc::new(ActionDef { name, spec }))
    }

    /// Name looked up in the type-frame.
    pub fn name(&self) -> Name {
        self.0.name
    }

    pub fn spec(&self) -> &ParamSpec {
        &self.0.spec
    }

    pub fn ptr_eq(&self, other: &ActionValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Arguments collected for a call.
///
/// Refinements that were given map to `true` (flags) or to their option
/// value; refinements that were not given are absent.
#[derive(Clone, Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    refinements: IndexMap<Name, Value, FxBuildHasher>,
}

impl CallArgs {
    pub fn new(positional: Vec<Value>) -> Self {
        CallArgs {
            positional,
            refinements: IndexMap::default(),
        }
    }

    /// Record a refinement.
    pub fn set_refinement(&mut self, name: Name, value: Value) {
        self.refinements.insert(name, value);
    }

    /// Positional arguments in order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Positional argument `index`, or `none` when absent.
    pub fn value(&self, index: usize) -> Value {
        self.positional.get(index).cloned().unwrap_or(Value::None)
    }

    /// Whether refinement `name` was given.
    pub fn has(&self, name: &str) -> bool {
        self.refinements.contains_key(&Name::intern(name))
    }

    /// Value given for refinement `name`.
    pub fn refinement(&self, name: Name) -> Option<&Value> {
        self.refinements.get(&name)
    }

    /// Option value for refinement `name`, when given.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.refinements.get(&Name::intern(name))
    }

    /// Given refinements in call order.
    pub fn refinements(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.refinements.iter().map(|(name, value)| (*name, value))
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
