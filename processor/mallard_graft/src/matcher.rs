//! Candidate scanning and structural matching.

use rustc_hash::FxHashSet;

use crate::element::{ElementKind, Round, TypeElement};
use crate::registry::{InterfaceDescriptor, InterfaceRegistry};
use crate::signature::signature;

/// A matched class with every interface it structurally satisfies, in
/// registry order. One match produces one batched rewrite.
#[derive(Debug)]
pub struct Match<'a> {
    pub class: &'a TypeElement,
    pub interfaces: Vec<&'a InterfaceDescriptor>,
}

/// Scan the round's root elements and match candidates against the
/// registry.
///
/// A class is a candidate when it is a class kind and not terminal. It
/// matches an interface when it does not already declare it (by FQN) and
/// its signature set covers the interface's signature list.
pub fn scan_round<'a>(round: &'a Round, registry: &'a InterfaceRegistry) -> Vec<Match<'a>> {
    let mut matches = Vec::new();

    for element in round.root_elements() {
        if element.kind != ElementKind::Class {
            continue;
        }
        if element.is_terminal() {
            tracing::debug!(class = %element.fqn(), "skipping terminal class");
            continue;
        }

        let declared: FxHashSet<String> = element.methods.iter().map(signature).collect();

        let interfaces: Vec<_> = registry
            .iter()
            .filter(|descriptor| covers(element, descriptor, &declared))
            .collect();

        if !interfaces.is_empty() {
            tracing::debug!(
                class = %element.fqn(),
                interfaces = interfaces.len(),
                "matched class"
            );
            matches.push(Match {
                class: element,
                interfaces,
            });
        }
    }

    matches
}

/// Coverage test for one (class, interface) pair.
fn covers(
    class: &TypeElement,
    descriptor: &InterfaceDescriptor,
    declared: &FxHashSet<String>,
) -> bool {
    if class.interfaces.iter().any(|i| *i == descriptor.fqn) {
        return false;
    }
    descriptor
        .signatures
        .iter()
        .all(|sig| declared.contains(sig))
}
