//! Path resolution utilities for memoir
//!
//! Provides functions to locate the data root and construct paths to the
//! files and directories under `.memoir/`.

use std::path::{Path, PathBuf};

use crate::errors::{MemoirError, Result};

/// Find the data root containing a .memoir directory.
///
/// Walks up the directory tree from the starting directory looking for a
/// directory that contains `.memoir`.
///
/// # Arguments
/// * `start_cwd` - The directory to start searching from
///
/// # Returns
/// The path to the data root
///
/// # Errors
/// * `RootNotFound` - If no directory with `.memoir` is found
pub fn find_data_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| MemoirError::RootNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(".memoir").exists() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(MemoirError::RootNotFound(
                    "Could not find a data root with a .memoir directory".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .memoir directory.
pub fn get_memoir_dir(root: &Path) -> PathBuf {
    root.join(".memoir")
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_memoir_dir(root).join("config.json")
}

/// Get the path to the sessions directory.
pub fn get_sessions_dir(root: &Path) -> PathBuf {
    get_memoir_dir(root).join("sessions")
}

/// Get the path to a session.json file.
pub fn get_session_path(root: &Path, session_id: &str) -> PathBuf {
    get_sessions_dir(root).join(format!("{}.json", session_id))
}

/// Get the path to the drafts directory.
pub fn get_drafts_dir(root: &Path) -> PathBuf {
    get_memoir_dir(root).join("drafts")
}

/// Get the path to a draft.json file.
pub fn get_draft_path(root: &Path, draft_id: &str) -> PathBuf {
    get_drafts_dir(root).join(format!("{}.json", draft_id))
}

/// Get the path to the drafts index cache.
pub fn get_index_path(root: &Path) -> PathBuf {
    get_memoir_dir(root).join("index.json")
}
