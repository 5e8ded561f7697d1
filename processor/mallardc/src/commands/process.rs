//! The `process` command: run one annotation processing round.

use std::io::IsTerminal;
use std::path::PathBuf;

use mallard_diagnostic::{ColorMode, DiagnosticEmitter, DiagnosticQueue, TerminalEmitter};
use mallard_graft::{Processor, ProcessorOptions};

use crate::snapshot::build_snapshot;

/// Configuration for the `process` command.
#[derive(Debug, Default)]
pub struct ProcessConfig {
    /// Root of the compilation source tree.
    pub source_root: PathBuf,
    /// Value of the `targetDirectory` option, when given.
    pub target_dir: Option<PathBuf>,
    /// Override for the marker annotation namespace.
    pub marker_namespace: Option<String>,
}

/// Run one round over the source tree. Returns the process exit code:
/// zero when no error diagnostic was emitted.
pub fn run_process(config: &ProcessConfig) -> i32 {
    let mut options = ProcessorOptions {
        target_directory: config.target_dir.clone(),
        ..ProcessorOptions::default()
    };
    if let Some(namespace) = &config.marker_namespace {
        options.marker_namespace = namespace.clone();
    }

    // Host side: snapshot of the round's elements.
    let mut host_queue = DiagnosticQueue::new();
    let snapshot = build_snapshot(&config.source_root, &mut host_queue);

    // Processor side.
    let mut processor = Processor::new(options, snapshot.lookup);
    let annotations = processor.supported_annotation_types();
    let claimed = processor.process(&annotations, &snapshot.round);
    debug_assert!(claimed, "the processor always claims its markers");

    let queue = processor.into_queue();

    let mut emitter = TerminalEmitter::<std::io::Stderr>::stderr(
        ColorMode::Auto,
        std::io::stderr().is_terminal(),
    );
    emitter.emit_all(host_queue.entries());
    emitter.emit_all(queue.entries());

    let errors = host_queue.error_count() + queue.error_count();
    let warnings = host_queue.warning_count() + queue.warning_count();
    emitter.emit_summary(errors, warnings);
    emitter.flush();

    i32::from(errors > 0)
}
