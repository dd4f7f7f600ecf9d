//! Binding rules: lookup, local-by-default assignment, closures and objects.
//!
//! A set-word in a call frame creates a local unless the frame already binds
//! the name, or the function captured the name from a non-root enclosing
//! frame when it was defined. In that case the enclosing binding is updated.
//! Root and object frames bind directly. Globals are only ever overwritten
//! from a call through the `set` native.

use std::rc::Rc;

use rook_ir::{FrameId, Name};
use rook_value::errors::no_value;
use rook_value::{
    EvalError, EvalResult, FunctionBody, FunctionValue, ObjectValue, ParamSpec, Series, UserBody,
    Value,
};
use rustc_hash::FxHashSet;

use super::Evaluator;
use crate::frame::{Frame, FrameKind};

impl Evaluator {
    /// Value of `name` seen from the current frame.
    pub(crate) fn lookup(&self, name: Name) -> EvalResult {
        self.stack
            .lookup(self.current, name)?
            .ok_or_else(|| no_value(name))
    }

    /// Bind `name` the way a set-word in the current frame does.
    pub(crate) fn assign(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        let current = self.current;
        let frame = self.stack.get(current)?;
        let target = match frame.kind() {
            FrameKind::Call if !frame.contains(name) => {
                let captured = frame.captured().is_some_and(|names| names.contains(&name));
                match (captured, frame.parent()) {
                    (true, Some(parent)) => self
                        .stack
                        .find_binding(parent, name)?
                        .filter(|owner| !owner.is_root())
                        .unwrap_or(current),
                    _ => current,
                }
            }
            _ => current,
        };
        self.stack.bind(target, name, value)
    }

    /// Names bound in every non-root frame on the lexical chain from
    /// `from`, at this moment.
    fn capture_names(&self, from: FrameId) -> Result<FxHashSet<Name>, EvalError> {
        let mut names = FxHashSet::default();
        let mut next = Some(from);
        while let Some(id) = next {
            if id.is_root() {
                break;
            }
            let frame = self.stack.get(id)?;
            names.extend(frame.names());
            next = frame.parent();
        }
        Ok(names)
    }

    /// Create a user function closing over the current frame.
    pub(crate) fn define_function(
        &mut self,
        spec: &Series<Value>,
        body: &Series<Value>,
    ) -> EvalResult {
        let spec = ParamSpec::parse(&spec.to_vec())?;
        let definition = self.stack.reference(self.current)?;
        let captured = Rc::new(self.capture_names(definition.id())?);
        Ok(Value::Function(FunctionValue::user(
            spec,
            UserBody {
                body: body.clone(),
                definition,
                captured,
            },
        )))
    }

    /// Create an object: prototype fields first (in their order), then every
    /// top-level set-word of `body` pre-bound to `none`, then `body` is run
    /// with the object frame current.
    ///
    /// Methods copied from the prototype are rebound to the new object, so
    /// calling them reads and updates the copy's fields.
    pub(crate) fn define_object(
        &mut self,
        prototype: Option<ObjectValue>,
        body: &Series<Value>,
    ) -> EvalResult {
        let creator = self.stack.reference(self.current)?;
        let mut frame = Frame::object(creator);
        if let Some(proto) = &prototype {
            for (name, value) in self.stack.get(proto.frame())?.bindings() {
                frame.bind(name, value.clone());
            }
        }
        let items = body.to_vec();
        for item in &items {
            if let Value::SetWord(name) = item {
                if !frame.contains(*name) {
                    frame.bind(*name, Value::None);
                }
            }
        }
        let object = ObjectValue::new(self.stack.push(frame)?);
        if let Some(proto) = &prototype {
            self.rebind_methods(proto.frame(), &object)?;
        }
        self.evaluate_in(object.frame(), &items)?;
        Ok(Value::Object(object))
    }

    /// Point every user function in `object` that was defined in `from` at
    /// the object's own frame.
    fn rebind_methods(&mut self, from: FrameId, object: &ObjectValue) -> Result<(), EvalError> {
        let id = object.frame();
        let methods: Vec<(Name, ParamSpec, Series<Value>)> = self
            .stack
            .get(id)?
            .bindings()
            .filter_map(|(name, value)| match value {
                Value::Function(f) => match f.body() {
                    FunctionBody::User(user) if user.definition.id() == from => {
                        Some((name, f.spec().clone(), user.body.clone()))
                    }
                    _ => None,
                },
                _ => None,
            })
            .collect();
        if methods.is_empty() {
            return Ok(());
        }
        let captured = Rc::new(self.capture_names(id)?);
        for (name, spec, body) in methods {
            let rebound = FunctionValue::user(
                spec,
                UserBody {
                    body,
                    definition: object.frame_ref().clone(),
                    captured: Rc::clone(&captured),
                },
            );
            self.stack.bind(id, name, Value::Function(rebound))?;
        }
        tracing::trace!(object = %id, "rebound prototype methods");
        Ok(())
    }
}
