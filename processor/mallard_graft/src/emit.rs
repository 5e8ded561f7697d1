//! Emitter and output path resolution.
//!
//! Generated units land at `<outputRoot>/<package path>/<Name>.java`,
//! never beside the input sources. Overwrites are permitted; writes are
//! idempotent.

use std::path::{Path, PathBuf};

/// Failure to emit one artifact. Fatal for the artifact, not the round.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to create output directory `{path}`: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Compute the on-disk path of a generated unit.
pub fn artifact_path(output_root: &Path, package: &str, simple_name: &str) -> PathBuf {
    let mut path = output_root.to_path_buf();
    if !package.is_empty() {
        path.push(package.replace('.', "/"));
    }
    path.push(format!("{simple_name}.java"));
    path
}

/// Write a generated unit, creating package directories as needed.
pub fn write_artifact(
    output_root: &Path,
    package: &str,
    simple_name: &str,
    contents: &str,
) -> Result<PathBuf, EmitError> {
    let path = artifact_path(output_root, package, simple_name);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| EmitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(&path, contents).map_err(|source| EmitError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(path)
}
