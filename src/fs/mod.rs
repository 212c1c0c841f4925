//! File system utilities for memoir
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_json};
pub use paths::{
    find_data_root, get_config_path, get_draft_path, get_drafts_dir, get_index_path,
    get_memoir_dir, get_session_path, get_sessions_dir, resolve_cwd,
};
