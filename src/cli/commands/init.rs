//! Init command - Create the .memoir data root

use std::path::Path;

use crate::errors::{MemoirError, Result};
use crate::fs::{self, get_config_path, get_drafts_dir, get_memoir_dir, get_sessions_dir};
use crate::schemas::EngineConfig;

/// Initialize a memoir data root in the working directory
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let memoir_dir = get_memoir_dir(&root);

    if memoir_dir.exists() && !force {
        return Err(MemoirError::ConfigError(format!(
            "{} already exists (use --force to reinitialize)",
            memoir_dir.display()
        )));
    }

    if dry_run {
        println!("Would initialize memoir data root at {}", memoir_dir.display());
        return Ok(());
    }

    std::fs::create_dir_all(get_sessions_dir(&root))?;
    std::fs::create_dir_all(get_drafts_dir(&root))?;
    fs::write_json(&get_config_path(&root), &EngineConfig::default())?;

    println!("Initialized memoir data root at {}", memoir_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, false).await.unwrap();

        assert!(temp.path().join(".memoir/sessions").is_dir());
        assert!(temp.path().join(".memoir/drafts").is_dir());
        assert!(temp.path().join(".memoir/config.json").is_file());
    }

    #[tokio::test]
    async fn test_init_refuses_existing_without_force() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, false).await.unwrap();

        let error = run(Some(temp.path()), false, false).await.unwrap_err();
        assert_eq!(error.code(), "CONFIG_ERROR");

        run(Some(temp.path()), true, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_init_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path()), false, true).await.unwrap();
        assert!(!temp.path().join(".memoir").exists());
    }
}
