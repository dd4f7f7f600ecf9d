//! Interned symbol identifier.
//!
//! Every word spelling in a script is interned once into the process-wide
//! [`StringInterner`](crate::StringInterner); afterwards symbols compare as
//! plain integers.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::interner::interner;

/// Interned symbol.
///
/// Layout: 32-bit index split into shard (4 bits) + local index (28 bits)
/// - Bits 31-28: Shard index (0-15)
/// - Bits 27-0: Local index within shard
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Maximum local index per shard.
    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Number of shards.
    pub const NUM_SHARDS: usize = 16;

    /// Prefix that marks a word as a refinement token (`--part`).
    pub const REFINEMENT_PREFIX: &'static str = "--";

    /// Create from shard and local index.
    #[inline]
    pub(crate) const fn new(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << 28) | local)
    }

    /// Intern `text` in the process-wide interner.
    #[inline]
    pub fn intern(text: &str) -> Self {
        interner().intern(text)
    }

    /// The symbol's spelling.
    #[inline]
    pub fn as_str(self) -> &'static str {
        interner().lookup(self)
    }

    /// If this symbol spells a refinement token (`--name`), the refinement's
    /// bare name.
    pub fn refinement(self) -> Option<Name> {
        let text = self.as_str();
        let bare = text.strip_prefix(Self::REFINEMENT_PREFIX)?;
        if bare.is_empty() || bare.starts_with('-') {
            return None;
        }
        Some(Name::intern(bare))
    }

    /// Extract shard index.
    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    /// Extract local index.
    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Hash for Name {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}
