//! Element snapshot construction.
//!
//! The driver plays the compiler host: it walks the source root, parses
//! every `.java` file, and derives the element snapshot the processor
//! sees as a round. Files that fail to read or parse draw a diagnostic
//! and are excluded; the rest of the snapshot is unaffected.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use mallard_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use mallard_graft::{elements_from_unit, MapLookup, Round, TypeResolver};
use mallard_ir::CompilationUnit;
use mallard_parse::parse_source;

use mallard_graft::signature::qualify;

/// A built snapshot: the round plus the host's file-lookup table.
pub struct Snapshot {
    pub round: Round,
    pub lookup: MapLookup,
}

/// Walk `source_root` and build the round snapshot.
pub fn build_snapshot(source_root: &Path, queue: &mut DiagnosticQueue) -> Snapshot {
    let mut files = Vec::new();
    collect_java_files(source_root, &mut files);
    files.sort();
    tracing::info!(files = files.len(), root = %source_root.display(), "scanning source root");

    let mut parsed: Vec<(PathBuf, CompilationUnit)> = Vec::new();
    for path in files {
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                queue.push(
                    Diagnostic::error(ErrorCode::E3001)
                        .with_message(format!("failed to read `{}`: {err}", path.display())),
                );
                continue;
            }
        };
        match parse_source(&source) {
            Ok(unit) => parsed.push((path, unit)),
            Err(err) => {
                queue.push_at(err.to_diagnostic(), &path, &source);
            }
        }
    }

    // First pass: every declared fully qualified name, so per-unit
    // resolvers can bind same-package and on-demand references.
    let mut known = FxHashSet::default();
    for (_, unit) in &parsed {
        for decl in &unit.types {
            known.insert(qualify(unit.package_name(), &decl.name));
        }
    }

    // Second pass: elements and the file-lookup table.
    let mut elements = Vec::new();
    let mut lookup = MapLookup::new();
    for (path, unit) in &parsed {
        let resolver = TypeResolver::for_unit(unit, &known);
        elements.extend(elements_from_unit(unit, &resolver, path));
        for decl in &unit.types {
            lookup.insert(qualify(unit.package_name(), &decl.name), path);
        }
    }

    Snapshot {
        round: Round::new(elements),
        lookup,
    }
}

/// Recursively collect `.java` files under `dir`.
fn collect_java_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), %err, "cannot read directory");
            return;
        }
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_java_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "java") {
            out.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            let created = std::fs::create_dir_all(parent);
            assert!(created.is_ok());
        }
        assert!(std::fs::write(&path, contents).is_ok());
    }

    #[test]
    fn builds_round_and_lookup_from_tree() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(err) => panic!("tempdir: {err}"),
        };
        write(dir.path(), "a/b/C.java", "package a.b;\npublic class C { }\n");
        write(dir.path(), "a/b/I.java", "package a.b;\npublic interface I { }\n");

        let mut queue = DiagnosticQueue::new();
        let snapshot = build_snapshot(dir.path(), &mut queue);

        assert!(!queue.has_errors());
        let fqns: Vec<_> = snapshot
            .round
            .root_elements()
            .iter()
            .map(mallard_graft::TypeElement::fqn)
            .collect();
        assert_eq!(fqns, vec!["a.b.C", "a.b.I"]);

        use mallard_graft::SourceLookup as _;
        assert!(snapshot.lookup.locate("a.b", "C").is_some());
        assert!(snapshot.lookup.locate("a.b", "Missing").is_none());
    }

    #[test]
    fn unparseable_file_is_excluded_with_a_diagnostic() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(err) => panic!("tempdir: {err}"),
        };
        write(dir.path(), "Good.java", "class Good { }\n");
        write(dir.path(), "Bad.java", "class {}\n");

        let mut queue = DiagnosticQueue::new();
        let snapshot = build_snapshot(dir.path(), &mut queue);

        assert_eq!(queue.error_count(), 1);
        assert_eq!(snapshot.round.root_elements().len(), 1);
    }
}
