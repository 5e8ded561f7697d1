//! Command handlers for the Mallard CLI.
//!
//! Each submodule implements one command. Shared helpers live here in the
//! module root.

mod debug;
mod process;

pub use debug::{lex_file, parse_file};
pub use process::{run_process, ProcessConfig};

/// Read a file or exit with a readable error.
///
/// Commands operate on user-named paths; a missing file is an immediate,
/// human-facing failure rather than a diagnostic.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("error: cannot read `{path}`: {err}");
            std::process::exit(1);
        }
    }
}
