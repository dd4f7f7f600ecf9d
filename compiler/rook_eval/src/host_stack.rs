//! Host stack safety for deep recursion.
//!
//! Nested evaluation (argument collection, function bodies, parens) recurses
//! on the host stack. Every entry into the dispatch loop goes through
//! [`ensure_sufficient_stack`], so the logical depth limit in
//! [`EvalConfig`](crate::EvalConfig) is what stops a runaway script, never a
//! host stack fault.
//!
//! For WASM targets where stacker isn't available, the closure is called
//! directly.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (128KB red zone).
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing (2MB).
    const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
