//! List command - List drafts with optional stage filtering

use std::path::Path;

use crate::errors::{MemoirError, Result};
use crate::fs::{find_data_root, resolve_cwd};
use crate::schemas::Stage;
use crate::store::JsonStore;

/// List drafts, optionally filtered by stage
pub async fn run(cwd: Option<&Path>, json: bool, stage: Option<&str>) -> Result<()> {
    let filter: Option<Stage> = match stage {
        Some(s) => Some(
            s.parse()
                .map_err(|_| MemoirError::UnknownStage(s.to_string()))?,
        ),
        None => None,
    };

    let root = find_data_root(&resolve_cwd(cwd))?;
    let store = JsonStore::new(&root);
    let index = store.index()?;

    let entries: Vec<_> = index
        .entries
        .iter()
        .filter(|e| filter.map_or(true, |s| e.stage == s))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        return Ok(());
    }

    if entries.is_empty() {
        println!("No drafts found");
        return Ok(());
    }
    for entry in entries {
        println!(
            "{}  v{}  {}  {}%  (session {})",
            entry.id, entry.version, entry.stage, entry.progress, entry.session_id
        );
    }
    Ok(())
}
