//! Command implementations for the memoir CLI

pub mod history;
pub mod ingest;
pub mod init;
pub mod list;
pub mod show;
pub mod status;
pub mod transition;
pub mod transitions;

use std::path::Path;

use crate::config::load_config;
use crate::domain::VersioningEngine;
use crate::errors::Result;
use crate::fs::{find_data_root, resolve_cwd};
use crate::store::JsonStore;

/// Resolve the data root and build an engine over the JSON store.
pub(crate) fn open_engine(cwd: Option<&Path>) -> Result<VersioningEngine<JsonStore, JsonStore>> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    Ok(VersioningEngine::new(
        config,
        JsonStore::new(&root),
        JsonStore::new(&root),
    ))
}
