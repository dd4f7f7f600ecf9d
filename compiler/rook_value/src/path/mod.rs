//! Dotted path expressions.
//!
//! A path is a non-empty list of segments whose head is always a word:
//! `obj.field`, `data.2`, `data.(pick-index)`. The head check happens in
//! [`Path::new`], so every `Path` value that exists is traversable.

use std::fmt;
use std::num::NonZeroUsize;
use std::rc::Rc;

use rook_ir::Name;

use crate::errors::{path_eval_base, EvalError};
use crate::series::Series;
use crate::value::Value;

/// One step of a path.
#[derive(Clone, Debug, PartialEq)]
pub enum Segment {
    /// Static field name.
    Word(Name),
    /// Static 1-based index.
    Index(NonZeroUsize),
    /// Computed segment, evaluated at traversal time.
    Eval(Series<Value>),
}

impl Segment {
    /// The segment as a value, for error arguments and rendering.
    pub fn to_value(&self) -> Value {
        match self {
            Segment::Word(name) => Value::Word(*name),
            Segment::Index(index) => {
                Value::Integer(i64::try_from(index.get()).unwrap_or(i64::MAX))
            }
            Segment::Eval(block) => Value::Paren(block.clone()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Word(name) => write!(f, "{name}"),
            Segment::Index(index) => write!(f, "{index}"),
            Segment::Eval(_) => write!(f, "{}", self.to_value()),
        }
    }
}

/// A validated path. Cloning shares the segment list.
#[derive(Clone, Debug, PartialEq)]
pub struct Path(Rc<[Segment]>);

impl Path {
    /// Build a path, rejecting one that does not start with a word.
    pub fn new(segments: Vec<Segment>) -> Result<Self, EvalError> {
        match segments.first() {
            Some(Segment::Word(_)) => Ok(Path(segments.into())),
            Some(other) => Err(path_eval_base(other.to_value())),
            None => Err(path_eval_base(Value::None)),
        }
    }

    /// The head word.
    pub fn base(&self) -> Name {
        match self.0.first() {
            Some(Segment::Word(name)) => *name,
            // `new` guarantees a word head
            _ => Name::EMPTY,
        }
    }

    /// Every segment, head included.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Segments after the head.
    pub fn rest(&self) -> &[Segment] {
        &self.0[1..]
    }

    /// Number of values sharing this segment list.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Address of the shared segment list.
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }

    /// Number of segments, head included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The last static word segment, used as the origin name when a path
    /// invokes a function.
    pub fn last_word(&self) -> Name {
        self.0
            .iter()
            .rev()
            .find_map(|segment| match segment {
                Segment::Word(name) => Some(*name),
                _ => None,
            })
            .unwrap_or_else(|| self.base())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
