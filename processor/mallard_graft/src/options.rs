//! Processor configuration.
//!
//! Options arrive from the host as key-value strings. Only two keys are
//! recognised; everything else is ignored.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

/// Option key for the build's target directory.
pub const TARGET_DIRECTORY_OPTION: &str = "targetDirectory";

/// Option key overriding the marker annotation namespace.
pub const MARKER_NAMESPACE_OPTION: &str = "markerNamespace";

/// Namespace of the marker annotations when not overridden.
pub const DEFAULT_MARKER_NAMESPACE: &str = "com.jinelei.ducktype.annotation";

/// Subtree created under the target directory for generated units.
const GENERATED_SUBTREE: &str = "generated-sources/annotations";

/// Resolved processor options.
#[derive(Clone, Debug)]
pub struct ProcessorOptions {
    /// Build target directory; `target` when absent.
    pub target_directory: Option<PathBuf>,
    /// Namespace the `DuckType` and `AddField` markers live in.
    pub marker_namespace: String,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        ProcessorOptions {
            target_directory: None,
            marker_namespace: DEFAULT_MARKER_NAMESPACE.to_string(),
        }
    }
}

impl ProcessorOptions {
    /// Build options from the host's key-value map.
    pub fn from_map(options: &FxHashMap<String, String>) -> Self {
        ProcessorOptions {
            target_directory: options.get(TARGET_DIRECTORY_OPTION).map(PathBuf::from),
            marker_namespace: options
                .get(MARKER_NAMESPACE_OPTION)
                .cloned()
                .unwrap_or_else(|| DEFAULT_MARKER_NAMESPACE.to_string()),
        }
    }

    /// The root directory generated units are written under.
    pub fn output_root(&self) -> PathBuf {
        self.target_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("target"))
            .join(GENERATED_SUBTREE)
    }

    /// Fully qualified name of the `DuckType` marker.
    pub fn duck_type_fqn(&self) -> String {
        format!("{}.DuckType", self.marker_namespace)
    }

    /// Fully qualified name of the `AddField` marker.
    pub fn add_field_fqn(&self) -> String {
        format!("{}.AddField", self.marker_namespace)
    }
}
