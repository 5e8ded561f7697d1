//! The tree mutator.
//!
//! Takes a parsed compilation unit and grafts matched interfaces onto the
//! target class: an entry in the implements clause, an import of each
//! interface's fully qualified name, and an `@Override` marker at
//! modifier position 0 of every matching method. All mutations are
//! insertions into the original text, batched for all interfaces of one
//! class so the file is parsed once.

use rustc_hash::FxHashSet;

use mallard_ir::{CompilationUnit, MethodDecl, TypeDecl};

use crate::edit::ChangeTracker;
use crate::registry::InterfaceDescriptor;
use crate::signature::{signature, SyntacticMethod, TypeResolver};

/// What one batched rewrite did.
#[derive(Debug, Default)]
pub struct GraftOutcome {
    /// The rewritten unit text.
    pub text: String,
    /// Simple names appended to the implements clause, in order.
    pub implements_added: Vec<String>,
    /// Fully qualified names added to the import list.
    pub imports_added: Vec<String>,
    /// Number of `@Override` markers inserted.
    pub overrides_added: usize,
    /// Signatures the matcher promised but no declaration satisfies,
    /// with the owning interface's FQN. Precondition violations.
    pub missing_signatures: Vec<(String, String)>,
    /// Whether any edit was made.
    pub changed: bool,
}

/// Rewrite failure independent of any single signature.
#[derive(Debug, thiserror::Error)]
pub enum MutateError {
    #[error("type `{0}` not found in its own compilation unit")]
    TargetMissing(String),
}

/// Graft `interfaces` onto `class_name` inside the parsed `unit`.
///
/// Interfaces the class already declares (by fully qualified name) are
/// skipped, which makes re-running the rewriter over its own output a
/// no-op.
pub fn graft_interfaces(
    source: &str,
    unit: &CompilationUnit,
    class_name: &str,
    interfaces: &[&InterfaceDescriptor],
    resolver: &TypeResolver,
) -> Result<GraftOutcome, MutateError> {
    let target = unit
        .type_by_name(class_name)
        .ok_or_else(|| MutateError::TargetMissing(class_name.to_string()))?;

    let declared: Vec<String> = target
        .implements
        .iter()
        .map(|t| resolver.canonical_base(&t.text))
        .collect();
    let to_add: Vec<&InterfaceDescriptor> = interfaces
        .iter()
        .copied()
        .filter(|d| !declared.iter().any(|fqn| *fqn == d.fqn))
        .collect();

    let mut outcome = GraftOutcome::default();
    let mut tracker = ChangeTracker::new();

    add_implements(&mut tracker, &mut outcome, target, &to_add);
    add_imports(&mut tracker, &mut outcome, unit, &to_add);
    annotate_methods(
        &mut tracker,
        &mut outcome,
        source,
        target,
        interfaces,
        resolver,
    );

    outcome.changed = !tracker.is_empty();
    outcome.text = tracker.apply(source);
    Ok(outcome)
}

/// Step 2a: extend or create the implements clause.
fn add_implements(
    tracker: &mut ChangeTracker,
    outcome: &mut GraftOutcome,
    target: &TypeDecl,
    to_add: &[&InterfaceDescriptor],
) {
    if to_add.is_empty() {
        return;
    }
    let names: Vec<&str> = to_add.iter().map(|d| d.simple_name.as_str()).collect();
    let joined = names.join(", ");

    if let Some(last) = target.implements.last() {
        tracker.insert_after(last.span, format!(", {joined}"));
    } else {
        tracker.insert(target.header_anchor, format!(" implements {joined}"));
    }
    outcome
        .implements_added
        .extend(names.iter().map(|n| (*n).to_string()));
}

/// Step 2b: import each interface's fully qualified name.
///
/// Exact duplicates are skipped so a rewrite of already-rewritten output
/// adds nothing.
fn add_imports(
    tracker: &mut ChangeTracker,
    outcome: &mut GraftOutcome,
    unit: &CompilationUnit,
    to_add: &[&InterfaceDescriptor],
) {
    let fresh: Vec<&str> = to_add
        .iter()
        .filter(|d| !unit.has_import(&d.fqn))
        .map(|d| d.fqn.as_str())
        .collect();
    if fresh.is_empty() {
        return;
    }

    let anchor = unit.import_anchor();
    let mut text = String::new();
    if anchor == 0 {
        // No package declaration and no imports: lead the file.
        for fqn in &fresh {
            text.push_str(&format!("import {fqn};\n"));
        }
        text.push('\n');
    } else {
        for fqn in &fresh {
            text.push_str(&format!("\nimport {fqn};"));
        }
    }
    tracker.insert(anchor, text);
    outcome
        .imports_added
        .extend(fresh.iter().map(|f| (*f).to_string()));
}

/// Step 3: prepend `@Override` to every method matching an interface
/// signature, skipping methods already so annotated.
fn annotate_methods(
    tracker: &mut ChangeTracker,
    outcome: &mut GraftOutcome,
    source: &str,
    target: &TypeDecl,
    interfaces: &[&InterfaceDescriptor],
    resolver: &TypeResolver,
) {
    let methods: Vec<(String, &MethodDecl)> = target
        .methods()
        .map(|m| (signature(&SyntacticMethod::new(m, resolver)), m))
        .collect();

    let mut annotated_at: FxHashSet<u32> = FxHashSet::default();

    for descriptor in interfaces {
        for sig in &descriptor.signatures {
            let mut found = false;
            for (method_sig, method) in &methods {
                if method_sig != sig {
                    continue;
                }
                found = true;
                if method.has_annotation("Override") {
                    continue;
                }
                if !annotated_at.insert(method.decl_start) {
                    continue;
                }
                tracker.insert(method.decl_start, override_marker(source, method.decl_start));
                outcome.overrides_added += 1;
            }
            if !found {
                outcome
                    .missing_signatures
                    .push((descriptor.fqn.clone(), sig.clone()));
            }
        }
    }
}

/// The marker text for one insertion point, matching the declaration's
/// own indentation when it starts a line.
fn override_marker(source: &str, at: u32) -> String {
    let at = at as usize;
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &source[line_start..at];
    if prefix.chars().all(char::is_whitespace) {
        format!("@Override\n{prefix}")
    } else {
        "@Override ".to_string()
    }
}
