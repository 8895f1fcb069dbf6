//! Library half of the `sigtree` binary.
//!
//! Kept separate from `src/bin/sigtree.rs` so argument parsing, config
//! loading and command dispatch can be tested without spawning a process.

pub mod args;
pub mod config;
pub mod driver;
pub mod tracing_config;
