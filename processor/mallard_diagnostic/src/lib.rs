//! Diagnostic system for the Mallard processor.
//!
//! This is the processor's side of the host messager channel:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Primary span (where it went wrong)
//! - Notes (how to fix)
//!
//! Components build a [`Diagnostic`], push it onto the [`DiagnosticQueue`],
//! and the driver renders the queue through a [`DiagnosticEmitter`] when
//! the round ends.

mod diagnostic;
mod emitter;
mod error_code;
mod queue;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticQueue, Entry, Origin};
