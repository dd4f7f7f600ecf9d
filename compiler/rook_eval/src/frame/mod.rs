//! Frames: ordered symbol-to-value scopes.
//!
//! One structure serves four roles, told apart by [`FrameKind`]:
//! - root: natives and globals, always `FrameId::ROOT`
//! - call: one function invocation's locals
//! - object: one object's fields
//! - type: one datatype's action implementations (lives in the
//!   `TypeRegistry`, never on the stack)

use std::rc::Rc;

use indexmap::IndexMap;
use rook_ir::{FrameId, Name};
use rook_value::{FrameRef, Value};
use rustc_hash::{FxBuildHasher, FxHashSet};

/// Role of a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Root,
    Call,
    Object,
    Type,
}

/// An insertion-ordered set of bindings plus the links that place it in
/// the lexical and dynamic chains.
#[derive(Clone, Debug)]
pub struct Frame {
    kind: FrameKind,
    /// Lexical parent: where lookup continues. Held, so a live frame's
    /// lexical chain is live too.
    parent: Option<FrameRef>,
    /// Frame that was current when this one was entered.
    caller: Option<FrameId>,
    /// Name the function was invoked through (call frames only).
    origin: Option<Name>,
    bindings: IndexMap<Name, Value, FxBuildHasher>,
    /// Names the called function may update in enclosing frames.
    captured: Option<Rc<FxHashSet<Name>>>,
}

impl Frame {
    fn with_kind(kind: FrameKind, parent: Option<FrameRef>, caller: Option<FrameId>) -> Self {
        Frame {
            kind,
            parent,
            caller,
            origin: None,
            bindings: IndexMap::default(),
            captured: None,
        }
    }

    /// The root frame.
    pub fn root() -> Self {
        Self::with_kind(FrameKind::Root, None, None)
    }

    /// A call frame for a function defined in `definition`, entered from
    /// `caller` through the word `origin`.
    pub fn call(
        definition: FrameRef,
        caller: FrameId,
        origin: Name,
        captured: Rc<FxHashSet<Name>>,
    ) -> Self {
        let mut frame = Self::with_kind(FrameKind::Call, Some(definition), Some(caller));
        frame.origin = Some(origin);
        frame.captured = Some(captured);
        frame
    }

    /// An object frame created while `creator` was current.
    pub fn object(creator: FrameRef) -> Self {
        let caller = creator.id();
        Self::with_kind(FrameKind::Object, Some(creator), Some(caller))
    }

    /// A detached type-frame.
    pub fn type_frame() -> Self {
        Self::with_kind(FrameKind::Type, None, None)
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn parent(&self) -> Option<FrameId> {
        self.parent.as_ref().map(FrameRef::id)
    }

    /// The held reference to the lexical parent.
    pub fn parent_ref(&self) -> Option<&FrameRef> {
        self.parent.as_ref()
    }

    pub fn caller(&self) -> Option<FrameId> {
        self.caller
    }

    pub fn origin(&self) -> Option<Name> {
        self.origin
    }

    /// Names this call may update in enclosing frames.
    pub fn captured(&self) -> Option<&FxHashSet<Name>> {
        self.captured.as_deref()
    }

    /// Insert or overwrite `name` in this frame only.
    pub fn bind(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Value bound to `name` in this frame only.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Bindings in insertion order.
    pub fn bindings(&self) -> impl Iterator<Item = (Name, &Value)> {
        self.bindings.iter().map(|(name, value)| (*name, value))
    }

    /// Bound names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
