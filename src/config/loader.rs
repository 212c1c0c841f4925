//! Configuration loading with defaults

use std::path::Path;

use crate::errors::Result;
use crate::fs;
use crate::schemas::EngineConfig;

/// Load configuration from the data root, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
pub fn load_config(root: &Path) -> Result<EngineConfig> {
    fs::read_config(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_defaults() {
        let temp = TempDir::new().unwrap();
        std_fs::create_dir(temp.path().join(".memoir")).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().unwrap();
        let memoir_dir = temp.path().join(".memoir");
        std_fs::create_dir(&memoir_dir).unwrap();

        let config_content = r#"{
            "min_approval_rating": 2.5,
            "min_rejection_reason_len": 20
        }"#;
        std_fs::write(memoir_dir.join("config.json"), config_content).unwrap();

        let config = load_config(temp.path()).unwrap();
        assert_eq!(config.min_approval_rating, 2.5);
        assert_eq!(config.min_rejection_reason_len, 20);
        // Default for unspecified field
        assert_eq!(config.significant_rating_delta, 0.3);
    }
}
