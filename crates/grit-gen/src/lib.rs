//! Demand-driven input construction.
//!
//! The surrounding generator works bottom-up: pick an operation, draw its
//! inputs from the pool of previously built sequences. When the pool has no
//! value of a required type, this crate constructs one top-down: search the
//! reachable operation graph for producers of the type, recursively discover
//! producers for their own arguments, synthesize candidate call sequences,
//! execute them, and bank the survivors back into the pool.
//!
//! A single [`InputCreator::create_input_for_type`] call is not required to
//! succeed. Partial progress (intermediate objects salvaged into the pool)
//! is how later calls eventually do.

pub mod config;
pub mod creator;
pub mod producers;
pub mod synthesis;
pub mod trackers;

pub use config::{ConfigError, GeneratorConfig};
pub use creator::{GenerationStats, InputCreator};
pub use producers::find_producers;
pub use trackers::Diagnostics;
