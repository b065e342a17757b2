//! Data directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the data root directory.
pub const DATA_DIR_ENV_VAR: &str = "DQ_STUDIO_DIR";

/// Subdirectory holding one JSON document per rule set.
pub const RULE_SETS_DIR: &str = "expectation_sets";

/// Subdirectory receiving persisted validation artifacts.
pub const VALIDATIONS_DIR: &str = "validations";

/// Extension of rule-set documents.
pub const RULE_SET_EXTENSION: &str = "json";

/// Get the data root directory.
///
/// Resolution order:
/// 1. `DQ_STUDIO_DIR` environment variable
/// 2. `dq_studio/` relative to the working directory
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("dq_studio")
}
