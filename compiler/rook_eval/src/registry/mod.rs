//! Type registry: per-datatype action implementations.
//!
//! Each registered [`TypeKind`] owns a type-frame mapping action names to
//! implementations. The registry is populated only through
//! [`TypeRegistryBuilder`]; [`TypeRegistryBuilder::build`] freezes it into a
//! [`SharedTypeRegistry`] with no mutating API, so registration is
//! write-once and every evaluator holding the registry reads the same
//! tables.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rook_ir::Name;
use rook_value::{FunctionValue, TypeKind, Value};
use rustc_hash::FxHashMap;

use crate::frame::Frame;

/// Registration failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A type-frame for this datatype already exists.
    #[error("datatype {0} is already registered")]
    DuplicateType(TypeKind),
    /// The same action was given twice for one datatype.
    #[error("datatype {kind} already implements {action}")]
    DuplicateAction { kind: TypeKind, action: Name },
}

/// Read-only table from datatype to type-frame.
pub struct TypeRegistry {
    frames: FxHashMap<TypeKind, Frame>,
}

impl TypeRegistry {
    /// Type-frame registered for `kind`.
    pub fn type_frame(&self, kind: TypeKind) -> Option<&Frame> {
        self.frames.get(&kind)
    }

    /// Implementation of `action` for `kind`.
    pub fn resolve(&self, kind: TypeKind, action: Name) -> Option<&Value> {
        self.frames.get(&kind)?.get(action)
    }

    /// Whether `kind` has a type-frame.
    pub fn contains(&self, kind: TypeKind) -> bool {
        self.frames.contains_key(&kind)
    }

    /// Registered datatypes, in `TypeKind` order.
    pub fn kinds(&self) -> Vec<TypeKind> {
        TypeKind::ALL
            .into_iter()
            .filter(|kind| self.frames.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.kinds().into_iter().map(|kind| {
                let actions: Vec<_> = self
                    .frames
                    .get(&kind)
                    .map(|frame| frame.names().map(Name::as_str).collect())
                    .unwrap_or_default();
                (kind, actions)
            }))
            .finish()
    }
}

/// Cheaply clonable handle to a frozen registry.
#[derive(Clone)]
pub struct SharedTypeRegistry(Rc<TypeRegistry>);

impl SharedTypeRegistry {
    /// Whether both handles share one registry.
    pub fn ptr_eq(&self, other: &SharedTypeRegistry) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedTypeRegistry {
    type Target = TypeRegistry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedTypeRegistry({:?})", &*self.0)
    }
}

impl Default for SharedTypeRegistry {
    fn default() -> Self {
        TypeRegistryBuilder::new().build()
    }
}

/// Collects type-frames during startup.
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    frames: FxHashMap<TypeKind, Frame>,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the type-frame for `kind`.
    pub fn register<I>(&mut self, kind: TypeKind, actions: I) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = (Name, FunctionValue)>,
    {
        if self.frames.contains_key(&kind) {
            return Err(RegistryError::DuplicateType(kind));
        }
        let mut frame = Frame::type_frame();
        for (action, implementation) in actions {
            if frame.contains(action) {
                return Err(RegistryError::DuplicateAction { kind, action });
            }
            frame.bind(action, Value::Function(implementation));
        }
        tracing::debug!(%kind, actions = frame.len(), "registered type-frame");
        self.frames.insert(kind, frame);
        Ok(self)
    }

    /// Whether `kind` has been registered so far.
    pub fn contains(&self, kind: TypeKind) -> bool {
        self.frames.contains_key(&kind)
    }

    /// Freeze the registry.
    pub fn build(self) -> SharedTypeRegistry {
        SharedTypeRegistry(Rc::new(TypeRegistry {
            frames: self.frames,
        }))
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
