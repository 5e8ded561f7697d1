//! Mallard CLI host driver.
//!
//! Plays the compiler host for the processor: walks a source root, builds
//! the element snapshot, runs a processing round, and renders queued
//! diagnostics. Also exposes `lex` and `parse` debug commands.

pub mod commands;
pub mod snapshot;

pub use snapshot::{build_snapshot, Snapshot};
