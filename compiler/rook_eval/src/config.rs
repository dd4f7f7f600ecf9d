//! Evaluator limits.

/// Resource limits for one evaluator.
///
/// - `max_depth`: nested `evaluate-next` entries before `stack-overflow`
/// - `max_frames`: live frames (root, objects, calls) before `stack-overflow`
/// - `where_depth`: function names recorded in an error's Where trace
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    pub max_depth: usize,
    pub max_frames: usize,
    pub where_depth: usize,
}

impl EvalConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 2048;
    pub const DEFAULT_MAX_FRAMES: usize = 1 << 20;
    pub const DEFAULT_WHERE_DEPTH: usize = 16;

    /// Set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the live frame limit.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Set how many names a Where trace keeps.
    #[must_use]
    pub fn with_where_depth(mut self, where_depth: usize) -> Self {
        self.where_depth = where_depth;
        self
    }
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_frames: Self::DEFAULT_MAX_FRAMES,
            where_depth: Self::DEFAULT_WHERE_DEPTH,
        }
    }
}
