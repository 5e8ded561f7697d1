//! Diagnostic emitters.
//!
//! Human-readable terminal output with optional ANSI color support. The
//! trait exists so the driver can swap in a capturing emitter in tests.

use std::io::{self, Write};

use crate::{Entry, Severity};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Returns "s" for plural counts, "" for singular.
#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Trait for emitting queued diagnostics.
pub trait DiagnosticEmitter {
    /// Emit a single entry.
    fn emit(&mut self, entry: &Entry);

    /// Emit multiple entries.
    fn emit_all(&mut self, entries: &[Entry]) {
        for entry in entries {
            self.emit(entry);
        }
    }

    /// Emit a summary of errors and warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);

    /// Flush any buffered output.
    fn flush(&mut self);
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Create a terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> TerminalEmitter<io::Stderr> {
        TerminalEmitter {
            writer: io::stderr(),
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn severity_color(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        }
    }

    fn write_header(&mut self, entry: &Entry) {
        let diag = &entry.diagnostic;
        if self.colors {
            let _ = write!(
                self.writer,
                "{}{}{}",
                Self::severity_color(diag.severity),
                diag.severity,
                colors::RESET
            );
        } else {
            let _ = write!(self.writer, "{}", diag.severity);
        }
        if let Some(code) = diag.code {
            let _ = write!(self.writer, "[{code}]");
        }
        if self.colors {
            let _ = writeln!(
                self.writer,
                ": {}{}{}",
                colors::BOLD,
                diag.message,
                colors::RESET
            );
        } else {
            let _ = writeln!(self.writer, ": {}", diag.message);
        }
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, entry: &Entry) {
        self.write_header(entry);

        if let Some(origin) = &entry.origin {
            let _ = writeln!(
                self.writer,
                "  --> {}:{}:{}",
                origin.path.display(),
                origin.line,
                origin.column
            );
            let _ = writeln!(self.writer, "   | {}", origin.line_text);
        }

        for label in &entry.diagnostic.labels {
            if !label.is_primary && !label.message.is_empty() {
                let _ = writeln!(self.writer, "   = {}", label.message);
            }
        }
        for note in &entry.diagnostic.notes {
            let _ = writeln!(self.writer, "   = note: {note}");
        }
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }
        let mut parts = Vec::new();
        if error_count > 0 {
            parts.push(format!("{error_count} error{}", plural_s(error_count)));
        }
        if warning_count > 0 {
            parts.push(format!("{warning_count} warning{}", plural_s(warning_count)));
        }
        let _ = writeln!(self.writer, "{} emitted", parts.join(", "));
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, DiagnosticQueue, ErrorCode};
    use mallard_ir::Span;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn render(entries: &[Entry], errors: usize, warnings: usize) -> String {
        let mut buf = Vec::new();
        {
            let mut emitter =
                TerminalEmitter::with_color_mode(&mut buf, ColorMode::Never, false);
            emitter.emit_all(entries);
            emitter.emit_summary(errors, warnings);
            emitter.flush();
        }
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn renders_code_location_and_summary() {
        let source = "class X {}";
        let mut queue = DiagnosticQueue::new();
        queue.push_at(
            Diagnostic::error(ErrorCode::E2001)
                .with_message("@DuckType can only be applied to interfaces")
                .with_label(Span::new(6, 7), "annotated here"),
            Path::new("X.java"),
            source,
        );

        let out = render(queue.entries(), queue.error_count(), queue.warning_count());
        assert!(out.contains("error[E2001]: @DuckType can only be applied to interfaces"));
        assert!(out.contains("--> X.java:1:7"));
        assert!(out.contains("1 error emitted"));
    }

    #[test]
    fn silent_summary_when_clean() {
        let out = render(&[], 0, 0);
        assert_eq!(out, "");
    }

    #[test]
    fn notes_render_without_code() {
        let mut queue = DiagnosticQueue::new();
        queue.push(Diagnostic::note().with_message("processing round"));
        let out = render(queue.entries(), 0, 0);
        assert!(out.starts_with("note: processing round"));
    }
}
