//! JSON file-backed repositories
//!
//! Sessions and drafts live as one JSON file each under `.memoir/`. Writes
//! go through the atomic write helper; every draft save also regenerates the
//! index cache used by the listing commands.

use std::path::{Path, PathBuf};

use crate::domain::stage_index;
use crate::errors::{MemoirError, Result};
use crate::fs::{
    get_draft_path, get_drafts_dir, get_index_path, get_session_path, read_json, write_json,
};
use crate::schemas::{Draft, Index, IndexEntry, Session};

use super::{DraftRepository, SessionRepository};

/// Session and draft store over the `.memoir/` directory
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at the given data root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonStore { root: root.into() }
    }

    /// The data root this store reads and writes under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regenerate the index cache from the drafts on disk.
    pub fn refresh_index(&self) -> Result<Index> {
        let mut drafts = self.list()?;
        drafts.sort_by(|a, b| {
            stage_index(a.stage)
                .cmp(&stage_index(b.stage))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut index = Index::new();
        index.entries = drafts
            .iter()
            .map(|d| IndexEntry {
                id: d.id.clone(),
                session_id: d.session_id.clone(),
                stage: d.stage,
                version: d.version,
                progress: d.progress.overall,
            })
            .collect();
        write_json(&get_index_path(&self.root), &index)?;
        Ok(index)
    }

    /// Read the index cache, rebuilding it if missing.
    pub fn index(&self) -> Result<Index> {
        let path = get_index_path(&self.root);
        if path.exists() {
            read_json(&path)
        } else {
            self.refresh_index()
        }
    }
}

impl SessionRepository for JsonStore {
    fn session(&self, id: &str) -> Result<Session> {
        match read_json(&get_session_path(&self.root, id)) {
            Err(MemoirError::FileNotFound(_)) => Err(MemoirError::SessionNotFound(id.to_string())),
            other => other,
        }
    }
}

impl DraftRepository for JsonStore {
    fn draft(&self, id: &str) -> Result<Draft> {
        match read_json(&get_draft_path(&self.root, id)) {
            Err(MemoirError::FileNotFound(_)) => Err(MemoirError::DraftNotFound(id.to_string())),
            other => other,
        }
    }

    fn draft_for_session(&self, session_id: &str) -> Result<Option<Draft>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|d| d.session_id == session_id))
    }

    fn save(&self, draft: &Draft, expected_version: Option<u32>) -> Result<()> {
        match expected_version {
            None => {
                if let Some(existing) = self.draft_for_session(&draft.session_id)? {
                    return Err(MemoirError::VersionConflict {
                        draft_id: existing.id,
                        expected: 0,
                        found: existing.version,
                    });
                }
            }
            Some(expected) => {
                let stored = self.draft(&draft.id)?;
                if stored.version != expected {
                    return Err(MemoirError::VersionConflict {
                        draft_id: draft.id.clone(),
                        expected,
                        found: stored.version,
                    });
                }
            }
        }
        write_json(&get_draft_path(&self.root, &draft.id), draft)?;
        self.refresh_index()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<Draft>> {
        let dir = get_drafts_dir(&self.root);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut drafts = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                drafts.push(read_json(&path)?);
            }
        }
        Ok(drafts)
    }
}
