//! # Shrinkage - shrink search for property-based testing
//!
//! When a property test finds a failing input, Shrinkage searches for a
//! smaller or simpler input that still fails, so the reported counterexample
//! is easy to read.
//!
//! The pieces, leaf first:
//! - [`Shrinker`]: maps a value to an ordered list of smaller candidates.
//! - [`Step`]: one round of candidates plus the way to derive the next round.
//! - [`ShrinkTree`]: the whole candidate space as a lazily expanded tree.
//! - [`ShrinkEngine`] / [`AsyncShrinkEngine`]: run rounds against a predicate
//!   under a [`ShrinkingMode`] and produce a [`ShrinkResult`] with a trace.
//!
//! ## Quick Start
//!
//! ```rust
//! use shrinkage::{PredicateError, ShrinkConfig, ShrinkEngine, ShrinkingMode, StringShrinker};
//!
//! let engine = ShrinkEngine::with_config(ShrinkConfig::with_mode(ShrinkingMode::Unbounded).quiet());
//! let result = engine
//!     .shrink("xx#yyy".to_string(), &StringShrinker::default(), |s: &String| {
//!         if s.contains('#') {
//!             Err(PredicateError::regression("contains a marker"))
//!         } else {
//!             Ok(())
//!         }
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.minimal, "#");
//! ```

// Public modules
pub mod config;
pub mod error;
#[cfg(feature = "persistence")]
pub mod persistence;
pub mod predicate;
pub mod shrink;
pub mod shrinker;
pub mod step;
pub mod trace;
pub mod tree;

// Re-export the main public API
pub use config::{
    ConfigManager, GlobalConfig, ShrinkConfig, ShrinkingMode, create_shrink_config,
    get_global_config, set_global_config, set_print_shrink_steps,
};
pub use error::{ConfigError, PredicateError};
#[cfg(feature = "persistence")]
pub use persistence::{ReportStore, ShrinkReport};
pub use predicate::{PredicateOutcome, catch_regressions};
pub use shrink::{AsyncShrinkEngine, ShrinkEngine, ShrinkResult, shrink, shrink_async};
pub use shrinker::{
    Bimap, BoolShrinker, IntShrinker, SequenceShrinker, Shrinker, StringShrinker,
};
pub use step::Step;
pub use trace::{MemorySink, ShrinkTrace, StderrSink, TraceSink};
pub use tree::ShrinkTree;
