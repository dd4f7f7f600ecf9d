//! Counted references to stack frames.
//!
//! Objects, user functions and child frames keep a frame alive by holding a
//! [`FrameRef`]. When the last one is dropped the frame's id is pushed onto
//! the [`ReleaseQueue`] of the stack that minted it; the stack frees the
//! slot the next time it reclaims.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rook_ir::FrameId;

/// Frames whose last reference has been dropped, not yet freed.
#[derive(Clone, Debug, Default)]
pub struct ReleaseQueue(Rc<RefCell<Vec<FrameId>>>);

impl ReleaseQueue {
    /// Take one released frame id.
    pub fn pop(&self) -> Option<FrameId> {
        self.0.borrow_mut().pop()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

struct Holder {
    frame: FrameId,
    queue: ReleaseQueue,
}

impl Drop for Holder {
    fn drop(&mut self) {
        self.queue.0.borrow_mut().push(self.frame);
    }
}

/// A counted reference to a live frame.
#[derive(Clone)]
pub struct FrameRef(Rc<Holder>);

impl FrameRef {
    /// First reference to `frame`; dropping the last clone queues it on
    /// `queue`.
    pub fn new(frame: FrameId, queue: &ReleaseQueue) -> Self {
        FrameRef(Rc::new(Holder {
            frame,
            queue: queue.clone(),
        }))
    }

    /// The referenced frame.
    #[inline]
    pub fn id(&self) -> FrameId {
        self.0.frame
    }

    /// Number of live references to the frame.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    pub fn downgrade(&self) -> WeakFrameRef {
        WeakFrameRef(Rc::downgrade(&self.0))
    }
}

impl fmt::Debug for FrameRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameRef({})", self.id())
    }
}

/// A reference that does not keep the frame alive.
#[derive(Clone, Debug, Default)]
pub struct WeakFrameRef(Weak<Holder>);

impl WeakFrameRef {
    /// A counted reference, unless every counted one is gone.
    pub fn upgrade(&self) -> Option<FrameRef> {
        self.0.upgrade().map(FrameRef)
    }

    /// Number of live counted references.
    pub fn holders(&self) -> usize {
        self.0.strong_count()
    }
}
