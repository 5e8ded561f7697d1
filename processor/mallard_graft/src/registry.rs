//! The per-round interface registry.

use std::path::PathBuf;

use rustc_hash::FxHashSet;

use mallard_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};

use crate::element::{ElementKind, Round};
use crate::signature::signature;

/// A `@DuckType` interface accepted into the registry.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct InterfaceDescriptor {
    pub fqn: String,
    pub simple_name: String,
    /// Declared method signatures, in declaration order, deduplicated.
    pub signatures: Vec<String>,
    pub origin: PathBuf,
}

/// All `@DuckType` interfaces of the current round, in host iteration
/// order. Rebuilt every round and discarded at round end.
#[derive(Debug, Default)]
pub struct InterfaceRegistry {
    descriptors: Vec<InterfaceDescriptor>,
}

impl InterfaceRegistry {
    /// Ingest every element annotated with the marker. Non-interface
    /// elements draw an error diagnostic and are skipped; the round
    /// continues.
    pub fn build(round: &Round, marker_fqn: &str, queue: &mut DiagnosticQueue) -> Self {
        let mut registry = InterfaceRegistry::default();

        for element in round.annotated_with(marker_fqn) {
            if element.kind != ElementKind::Interface {
                queue.push(
                    Diagnostic::error(ErrorCode::E2001)
                        .with_message("@DuckType can only be applied to interfaces")
                        .with_note(format!(
                            "`{}` is declared in {}",
                            element.fqn(),
                            element.origin.display()
                        )),
                );
                continue;
            }

            let mut seen = FxHashSet::default();
            let signatures = element
                .methods
                .iter()
                .map(signature)
                .filter(|s| seen.insert(s.clone()))
                .collect();

            tracing::debug!(interface = %element.fqn(), "registered duck-type interface");
            registry.descriptors.push(InterfaceDescriptor {
                fqn: element.fqn(),
                simple_name: element.simple_name.clone(),
                signatures,
                origin: element.origin.clone(),
            });
        }

        registry
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InterfaceDescriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
