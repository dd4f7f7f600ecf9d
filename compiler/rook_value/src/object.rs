//! Object values.

use std::hash::{Hash, Hasher};

use rook_ir::FrameId;

use crate::frame_ref::FrameRef;

/// An object: a handle to the frame holding its fields.
///
/// Field storage lives in the evaluator's stack. Clones alias the same
/// fields, and the frame lives as long as some clone does.
#[derive(Clone, Debug)]
pub struct ObjectValue {
    frame: FrameRef,
}

impl ObjectValue {
    /// Object backed by the referenced frame.
    pub fn new(frame: FrameRef) -> Self {
        ObjectValue { frame }
    }

    /// The frame holding this object's fields.
    pub fn frame(&self) -> FrameId {
        self.frame.id()
    }

    /// The counted reference keeping the fields alive.
    pub fn frame_ref(&self) -> &FrameRef {
        &self.frame
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.frame() == other.frame()
    }
}

impl Eq for ObjectValue {}

impl Hash for ObjectValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.frame().hash(state);
    }
}
