//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{MemoirError, Result};
use crate::schemas::EngineConfig;

use super::paths::get_config_path;

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or fails schema validation
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MemoirError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            MemoirError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        MemoirError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial
/// writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| MemoirError::InvalidJson(e.to_string()))?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write atomically: write to temp file, then rename
    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a data root.
///
/// Returns the default configuration if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<EngineConfig> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    read_json(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Session;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Session> = read_json(&path);
        assert!(matches!(result.unwrap_err(), MemoirError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Session> = read_json(&path);
        assert!(matches!(result.unwrap_err(), MemoirError::InvalidJson(_)));
    }

    #[test]
    fn test_write_and_read_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");

        let session = Session::new("s-1".to_string(), "u-1".to_string());
        write_json(&path, &session).unwrap();
        assert!(path.exists());

        let read: Session = read_json(&path).unwrap();
        assert_eq!(read.id, session.id);
        assert_eq!(read.user_id, session.user_id);
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("session.json");

        let session = Session::new("s-1".to_string(), "u-1".to_string());
        write_json(&path, &session).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".memoir")).unwrap();

        let config = read_config(temp.path()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_read_config_from_file() {
        let temp = TempDir::new().unwrap();
        let memoir_dir = temp.path().join(".memoir");
        fs::create_dir(&memoir_dir).unwrap();
        fs::write(
            memoir_dir.join("config.json"),
            r#"{"significant_rating_delta": 0.5}"#,
        )
        .unwrap();

        let config = read_config(temp.path()).unwrap();
        assert_eq!(config.significant_rating_delta, 0.5);
        // Default for unspecified field
        assert_eq!(config.min_rejection_reason_len, 10);
    }
}
