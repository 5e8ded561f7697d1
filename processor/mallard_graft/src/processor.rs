//! The processor facade.
//!
//! Ties the pipeline together for one round: registry, scan, match, then
//! per-match locate / mutate / emit, then the `AddField` branch. No
//! failure escapes its match; `process` always returns `true` so the
//! markers are claimed regardless of per-element outcomes.

use mallard_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};

use crate::addfield::companion_unit;
use crate::element::{ElementKind, Round};
use crate::emit::{write_artifact, EmitError};
use crate::locate::{load_unit, LocateError, SourceLookup};
use crate::matcher::{scan_round, Match};
use crate::mutate::graft_interfaces;
use crate::options::ProcessorOptions;
use crate::registry::InterfaceRegistry;
use crate::signature::TypeResolver;

/// Source language versions the processor accepts.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SourceVersion {
    /// Whatever the host supports; the processor has no version-specific
    /// behaviour.
    Latest,
}

/// The annotation processor.
pub struct Processor<L: SourceLookup> {
    options: ProcessorOptions,
    lookup: L,
    queue: DiagnosticQueue,
}

impl<L: SourceLookup> Processor<L> {
    pub fn new(options: ProcessorOptions, lookup: L) -> Self {
        Processor {
            options,
            lookup,
            queue: DiagnosticQueue::new(),
        }
    }

    /// The marker annotations this processor claims, by FQN.
    pub fn supported_annotation_types(&self) -> [String; 2] {
        [self.options.duck_type_fqn(), self.options.add_field_fqn()]
    }

    /// The processor accepts the latest source version the host offers.
    pub const fn supported_source_version() -> SourceVersion {
        SourceVersion::Latest
    }

    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    pub fn queue(&self) -> &DiagnosticQueue {
        &self.queue
    }

    /// Take ownership of the queued diagnostics, e.g. to render them.
    pub fn into_queue(self) -> DiagnosticQueue {
        self.queue
    }

    /// Run one processing round over the host's element snapshot.
    ///
    /// `annotations` is the set of claimed markers the host found this
    /// round; the processor derives its work from the round itself.
    /// Always returns `true`.
    pub fn process(&mut self, annotations: &[String], round: &Round) -> bool {
        tracing::info!(
            markers = annotations.len(),
            elements = round.root_elements().len(),
            "processing round"
        );

        let duck_type = self.options.duck_type_fqn();
        let registry = InterfaceRegistry::build(round, &duck_type, &mut self.queue);
        tracing::debug!(interfaces = registry.len(), "registry built");

        let matches = scan_round(round, &registry);
        for matched in &matches {
            self.graft_match(round, matched);
        }

        self.run_add_field(round);

        true
    }

    /// Rewrite one matched class: locate and parse its source, graft all
    /// matched interfaces in one batch, and emit the result.
    fn graft_match(&mut self, round: &Round, matched: &Match<'_>) {
        let class = matched.class;

        let loaded = match load_unit(&self.lookup, &class.package, &class.simple_name) {
            Ok(loaded) => loaded,
            Err(err) => {
                let code = match &err {
                    LocateError::NotFound(_) | LocateError::Io { .. } => ErrorCode::E3001,
                    LocateError::Parse { .. } => ErrorCode::E3002,
                };
                self.queue.push(
                    Diagnostic::error(code)
                        .with_message(format!("cannot rewrite `{}`: {err}", class.fqn())),
                );
                return;
            }
        };

        let resolver = TypeResolver::for_unit(&loaded.unit, round.known_types());
        let outcome = match graft_interfaces(
            &loaded.source,
            &loaded.unit,
            &class.simple_name,
            &matched.interfaces,
            &resolver,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                self.queue.push(
                    Diagnostic::error(ErrorCode::E3003)
                        .with_message(format!("cannot rewrite `{}`: {err}", class.fqn())),
                );
                return;
            }
        };

        // The matcher promised coverage; a signature with no declaration
        // here is a precondition violation. Report it and keep going.
        for (interface, sig) in &outcome.missing_signatures {
            self.queue.push(
                Diagnostic::error(ErrorCode::E3004).with_message(format!(
                    "`{}` matched `{interface}` but declares no method `{sig}`",
                    class.fqn()
                )),
            );
        }

        let root = self.options.output_root();
        match write_artifact(&root, &class.package, &class.simple_name, &outcome.text) {
            Ok(path) => {
                tracing::info!(
                    class = %class.fqn(),
                    interfaces = outcome.implements_added.len(),
                    overrides = outcome.overrides_added,
                    "generated enhanced class"
                );
                let names: Vec<&str> = matched
                    .interfaces
                    .iter()
                    .map(|d| d.simple_name.as_str())
                    .collect();
                self.queue.push(Diagnostic::note().with_message(format!(
                    "grafted {} onto {} ({})",
                    names.join(", "),
                    class.fqn(),
                    path.display()
                )));
            }
            Err(err) => self.queue.push(emit_diagnostic(&err)),
        }
    }

    /// The `AddField` branch: emit a fixed companion unit for each marked
    /// class. Does not read the original source.
    fn run_add_field(&mut self, round: &Round) {
        let marker = self.options.add_field_fqn();
        let root = self.options.output_root();

        for element in round.annotated_with(&marker) {
            if element.kind != ElementKind::Class {
                self.queue.push(
                    Diagnostic::warning(ErrorCode::E2001).with_message(format!(
                        "@AddField only applies to classes; skipping `{}`",
                        element.fqn()
                    )),
                );
                continue;
            }

            let text = companion_unit(&element.package, &element.simple_name);
            match write_artifact(&root, &element.package, &element.simple_name, &text) {
                Ok(path) => {
                    tracing::info!(class = %element.fqn(), "generated companion unit");
                    self.queue.push(Diagnostic::note().with_message(format!(
                        "generated companion for {} ({})",
                        element.fqn(),
                        path.display()
                    )));
                }
                Err(err) => self.queue.push(emit_diagnostic(&err)),
            }
        }
    }
}

fn emit_diagnostic(err: &EmitError) -> Diagnostic {
    let code = match err {
        EmitError::CreateDir { .. } => ErrorCode::E3005,
        EmitError::Write { .. } => ErrorCode::E3006,
    };
    Diagnostic::error(code).with_message(err.to_string())
}
