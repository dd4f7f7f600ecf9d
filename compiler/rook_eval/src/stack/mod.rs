//! The frame stack: a generational arena of frames.
//!
//! Frames are addressed by [`FrameId`]. Growing the backing vector moves
//! frame records but never changes a handle's meaning.
//!
//! A frame lives while something holds a [`FrameRef`] to it: the call that
//! is running in it, an object whose fields it stores, a function defined
//! in it, or a child frame whose lexical parent it is. When the last
//! reference drops, the id lands on the stack's release queue and the slot
//! is freed on the next [`Stack::reclaim`]. Frames kept alive only by a
//! reference cycle (an object holding its own methods) are found by
//! [`Stack::sweep`]. A freed slot is reused under a bumped generation, so
//! an outdated handle fails with `stale-frame` instead of reading someone
//! else's bindings.

use rook_ir::{FrameId, Name};
use rook_value::errors::{frame_limit, stale_frame};
use rook_value::{EvalError, FrameRef, ReleaseQueue, Value, WeakFrameRef};

use crate::frame::Frame;

mod sweep;

/// Live-frame count that triggers the first cycle sweep.
const FIRST_SWEEP: usize = 1024;

#[derive(Debug)]
struct Slot {
    generation: u32,
    frame: Option<Frame>,
    holder: WeakFrameRef,
}

/// Generational arena of frames. Slot 0 always holds the root frame.
#[derive(Debug)]
pub struct Stack {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    max_frames: usize,
    released: ReleaseQueue,
    root: FrameRef,
    next_sweep: usize,
}

impl Stack {
    /// A stack holding only the root frame.
    pub fn new(max_frames: usize) -> Self {
        let released = ReleaseQueue::default();
        let root = FrameRef::new(FrameId::ROOT, &released);
        Stack {
            slots: vec![Slot {
                generation: 0,
                frame: Some(Frame::root()),
                holder: root.downgrade(),
            }],
            free: Vec::new(),
            live: 1,
            max_frames,
            released,
            root,
            next_sweep: FIRST_SWEEP,
        }
    }

    /// Allocate a frame, reusing a freed slot when one is available.
    ///
    /// The returned reference is the only one; dropping it without storing
    /// a clone frees the frame.
    pub fn push(&mut self, frame: Frame) -> Result<FrameRef, EvalError> {
        self.reclaim();
        if self.live >= self.next_sweep.min(self.max_frames) {
            self.sweep();
        }
        if self.live >= self.max_frames {
            return Err(frame_limit(self.max_frames));
        }
        let (index, generation) = if let Some(index) = self.free.pop() {
            (index, self.slots[index as usize].generation)
        } else {
            let index = u32::try_from(self.slots.len()).map_err(|_| frame_limit(self.max_frames))?;
            self.slots.push(Slot {
                generation: 0,
                frame: None,
                holder: WeakFrameRef::default(),
            });
            (index, 0)
        };
        let handle = FrameRef::new(FrameId::new(index, generation), &self.released);
        let slot = &mut self.slots[index as usize];
        slot.frame = Some(frame);
        slot.holder = handle.downgrade();
        self.live += 1;
        Ok(handle)
    }

    /// Free every frame whose last reference has been dropped. Returns how
    /// many were freed.
    pub fn reclaim(&mut self) -> usize {
        let mut freed = 0;
        while let Some(id) = self.released.pop() {
            // Dropping the frame may release its parent and the frames its
            // values referenced; those join the queue.
            if self.free_slot(id).is_some() {
                freed += 1;
            }
        }
        freed
    }

    /// Take the frame out of its slot and retire the slot's generation.
    fn free_slot(&mut self, id: FrameId) -> Option<Frame> {
        if id.is_root() {
            return None;
        }
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        let frame = slot.frame.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        slot.holder = WeakFrameRef::default();
        // `index()` came from a `u32`
        self.free.push(u32::try_from(id.index()).unwrap_or(u32::MAX));
        self.live -= 1;
        tracing::trace!(frame = %id, "freed frame");
        Some(frame)
    }

    /// A counted reference to the live frame `id`.
    pub fn reference(&self, id: FrameId) -> Result<FrameRef, EvalError> {
        if id.is_root() {
            return Ok(self.root.clone());
        }
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation() && slot.frame.is_some())
            .and_then(|slot| slot.holder.upgrade())
            .ok_or_else(|| stale_frame(id))
    }

    /// Frame for `id`, or `stale-frame` if it no longer exists.
    pub fn get(&self, id: FrameId) -> Result<&Frame, EvalError> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.frame.as_ref())
            .ok_or_else(|| stale_frame(id))
    }

    /// Mutable frame for `id`, or `stale-frame` if it no longer exists.
    pub fn get_mut(&mut self, id: FrameId) -> Result<&mut Frame, EvalError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.frame.as_mut())
            .ok_or_else(|| stale_frame(id))
    }

    /// Whether `id` names a live frame.
    pub fn is_live(&self, id: FrameId) -> bool {
        self.get(id).is_ok()
    }

    /// Bind in the frame `id` only; never walks ancestors.
    pub fn bind(&mut self, id: FrameId, name: Name, value: Value) -> Result<(), EvalError> {
        self.get_mut(id)?.bind(name, value);
        Ok(())
    }

    /// Nearest frame, starting at `from` and following lexical parents, that
    /// binds `name`.
    pub fn find_binding(&self, from: FrameId, name: Name) -> Result<Option<FrameId>, EvalError> {
        let mut id = from;
        loop {
            let frame = self.get(id)?;
            if frame.contains(name) {
                return Ok(Some(id));
            }
            match frame.parent() {
                Some(parent) => id = parent,
                None => return Ok(None),
            }
        }
    }

    /// Value of `name` as seen from `from`.
    pub fn lookup(&self, from: FrameId, name: Name) -> Result<Option<Value>, EvalError> {
        let Some(owner) = self.find_binding(from, name)? else {
            return Ok(None);
        };
        Ok(self.get(owner)?.get(name).cloned())
    }

    /// Live frames in slot order.
    pub fn frames(&self) -> impl Iterator<Item = (FrameId, &Frame)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let frame = slot.frame.as_ref()?;
            let index = u32::try_from(index).ok()?;
            Some((FrameId::new(index, slot.generation), frame))
        })
    }

    /// Number of live frames, including any released but not yet reclaimed.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always false: the root frame is permanent.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots in the backing storage, live or free.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
