//! Status command - Draft counts per stage

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::STAGES;
use crate::errors::Result;
use crate::fs::{find_data_root, resolve_cwd};
use crate::store::JsonStore;

/// Show draft counts per stage
pub async fn run(cwd: Option<&Path>, json: bool) -> Result<()> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let store = JsonStore::new(&root);
    let index = store.index()?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in &index.entries {
        *counts.entry(entry.stage.to_string()).or_default() += 1;
    }

    if json {
        let output = serde_json::json!({
            "total": index.entries.len(),
            "by_stage": counts,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("{} draft(s)", index.entries.len());
    for stage in STAGES {
        if let Some(count) = counts.get(&stage.to_string()) {
            println!("  {:<17} {}", stage.to_string(), count);
        }
    }
    Ok(())
}
