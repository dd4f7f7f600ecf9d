//! Rook Eval - the evaluation engine of the Rook interpreter.
//!
//! # Architecture
//!
//! - `Stack`: generational arena of `Frame`s addressed by `FrameId`
//! - `Evaluator`: the dispatch loop (`evaluate` / `evaluate_next`), calls,
//!   closures and local-by-default scoping
//! - `TypeRegistry`: datatype to type-frame table used for action dispatch
//! - path traversal and assignment with exactly-once computed segments
//! - Near/Where capture attached to errors as they unwind
//! - `prelude`: the minimal native library installed through the public
//!   extension points
//!
//! # Extension points
//!
//! Hosts inject natives and globals into the root frame
//! ([`EvaluatorBuilder::native`], [`Evaluator::bind_global`]) and install
//! per-datatype actions with [`TypeRegistryBuilder`] before building.

mod builder;
mod config;
pub mod diagnostics;
mod evaluator;
mod frame;
mod host_stack;
mod path;
pub mod prelude;
mod registry;
mod stack;

#[cfg(test)]
pub mod test_helpers;

use std::sync::Once;

pub use builder::EvaluatorBuilder;
pub use config::EvalConfig;
pub use evaluator::Evaluator;
pub use frame::{Frame, FrameKind};
pub use host_stack::ensure_sufficient_stack;
pub use registry::{RegistryError, SharedTypeRegistry, TypeRegistry, TypeRegistryBuilder};
pub use stack::Stack;

pub use rook_value::{EvalError, EvalResult, Value};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Runs at most once per process and does nothing when `RUST_LOG` is unset.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
