//! Source location and loading.
//!
//! The host owns file lookup; the processor only knows how to ask for a
//! type's original source by package and simple name, read it as UTF-8,
//! and parse it. Every failure aborts the current match with a
//! diagnostic; the round continues.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use mallard_ir::CompilationUnit;
use mallard_parse::{parse_source, ParseError};

use crate::signature::qualify;

/// The host's file-lookup service.
pub trait SourceLookup {
    /// Resolve the source file of a top-level type.
    fn locate(&self, package: &str, simple_name: &str) -> Option<PathBuf>;
}

/// Lookup backed by a map from fully qualified name to path, as built by
/// the driver while walking the source root.
#[derive(Debug, Default)]
pub struct MapLookup {
    paths: FxHashMap<String, PathBuf>,
}

impl MapLookup {
    pub fn new() -> Self {
        MapLookup::default()
    }

    pub fn insert(&mut self, fqn: impl Into<String>, path: impl Into<PathBuf>) {
        self.paths.insert(fqn.into(), path.into());
    }
}

impl SourceLookup for MapLookup {
    fn locate(&self, package: &str, simple_name: &str) -> Option<PathBuf> {
        self.paths.get(&qualify(package, simple_name)).cloned()
    }
}

/// Failure to produce a parsed unit for a matched class.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("no source file for `{0}`")]
    NotFound(String),
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// A successfully loaded and parsed source file.
#[derive(Debug)]
pub struct LoadedUnit {
    pub path: PathBuf,
    pub source: String,
    pub unit: CompilationUnit,
}

/// Locate, read, and parse the original source of a type.
pub fn load_unit(
    lookup: &dyn SourceLookup,
    package: &str,
    simple_name: &str,
) -> Result<LoadedUnit, LocateError> {
    let fqn = qualify(package, simple_name);
    let path = lookup
        .locate(package, simple_name)
        .ok_or(LocateError::NotFound(fqn))?;

    let source = std::fs::read_to_string(&path).map_err(|source| LocateError::Io {
        path: path.clone(),
        source,
    })?;

    let unit = parse_source(&source).map_err(|source| LocateError::Parse {
        path: path.clone(),
        source,
    })?;

    Ok(LoadedUnit { path, source, unit })
}
