//! Generational frame handles.
//!
//! A `FrameId` names one slot of the evaluator's frame stack together with
//! the generation that slot had when the frame was allocated. Reusing a slot
//! bumps its generation, so a handle held past its frame's lifetime can be
//! detected instead of silently aliasing a newer frame.

use std::fmt;

/// Handle to a frame in the evaluator's frame stack.
///
/// - Memory: 8 bytes, `Copy`
/// - Equality: O(1) integer compare
/// - Stability: the handle stays valid across any growth of the backing
///   storage for as long as its frame is alive
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameId {
    index: u32,
    generation: u32,
}

impl FrameId {
    /// The root frame: always slot 0, generation 0.
    pub const ROOT: FrameId = FrameId {
        index: 0,
        generation: 0,
    };

    /// Create a handle from its parts.
    #[inline]
    pub const fn new(index: u32, generation: u32) -> Self {
        FrameId { index, generation }
    }

    /// Slot index in the backing storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot when the frame was allocated.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Whether this is the root frame.
    #[inline]
    pub const fn is_root(self) -> bool {
        self.index == 0 && self.generation == 0
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "FrameId::ROOT")
        } else {
            write!(f, "FrameId({}v{})", self.index, self.generation)
        }
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}
