//! Rook IR - shared identifier types for the Rook interpreter.
//!
//! This crate holds the small, `Copy` handle types every other layer passes
//! around:
//! - `Name`: an interned symbol (words, field names, refinement names)
//! - `Span`: byte range of a value in its source text
//! - `FrameId`: generational handle into the evaluator's frame stack
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: symbol spelling -> `Name(u32)`, O(1) equality
//! - **Handles, not references**: frames are addressed by `FrameId`, never by
//!   pointer, so growth of the backing storage cannot invalidate them

mod frame_id;
mod interner;
mod name;
mod span;

pub use frame_id::FrameId;
pub use interner::{interner, InternError, StringInterner};
pub use name::Name;
pub use span::Span;
