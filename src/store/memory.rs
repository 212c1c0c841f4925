//! In-memory repositories for tests and embedding
//!
//! Clones share state, so a test can hold one handle while the engine
//! holds another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::{MemoirError, Result};
use crate::schemas::{Draft, Session};

use super::{DraftRepository, SessionRepository};

#[derive(Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    drafts: HashMap<String, Draft>,
}

/// Shared in-memory session and draft store
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session
    pub fn put_session(&self, session: Session) {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.sessions.insert(session.id.clone(), session);
    }
}

impl SessionRepository for MemoryStore {
    fn session(&self, id: &str) -> Result<Session> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner
            .sessions
            .get(id)
            .cloned()
            .ok_or_else(|| MemoirError::SessionNotFound(id.to_string()))
    }
}

impl DraftRepository for MemoryStore {
    fn draft(&self, id: &str) -> Result<Draft> {
        let inner = self.inner.lock().expect("memory store poisoned");
        inner
            .drafts
            .get(id)
            .cloned()
            .ok_or_else(|| MemoirError::DraftNotFound(id.to_string()))
    }

    fn draft_for_session(&self, session_id: &str) -> Result<Option<Draft>> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .drafts
            .values()
            .find(|d| d.session_id == session_id)
            .cloned())
    }

    fn save(&self, draft: &Draft, expected_version: Option<u32>) -> Result<()> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        match expected_version {
            None => {
                if let Some(existing) = inner
                    .drafts
                    .values()
                    .find(|d| d.session_id == draft.session_id)
                {
                    return Err(MemoirError::VersionConflict {
                        draft_id: existing.id.clone(),
                        expected: 0,
                        found: existing.version,
                    });
                }
            }
            Some(expected) => {
                let stored = inner
                    .drafts
                    .get(&draft.id)
                    .ok_or_else(|| MemoirError::DraftNotFound(draft.id.clone()))?;
                if stored.version != expected {
                    return Err(MemoirError::VersionConflict {
                        draft_id: draft.id.clone(),
                        expected,
                        found: stored.version,
                    });
                }
            }
        }
        inner.drafts.insert(draft.id.clone(), draft.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Draft>> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner.drafts.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{DraftContent, DraftProgress, Stage};

    fn make_draft(id: &str, session_id: &str) -> Draft {
        Draft::new(
            id.to_string(),
            session_id.to_string(),
            "u-1".to_string(),
            Stage::FirstDraft,
            DraftContent::default(),
            DraftProgress::default(),
            1,
            3,
        )
    }

    #[test]
    fn test_session_not_found() {
        let store = MemoryStore::new();
        let error = store.session("missing").unwrap_err();
        assert_eq!(error.code(), "SESSION_NOT_FOUND");
    }

    #[test]
    fn test_put_and_get_session() {
        let store = MemoryStore::new();
        store.put_session(Session::new("s-1".to_string(), "u-1".to_string()));
        assert_eq!(store.session("s-1").unwrap().user_id, "u-1");
    }

    #[test]
    fn test_create_and_load_draft() {
        let store = MemoryStore::new();
        let draft = make_draft("d-1", "s-1");
        store.save(&draft, None).unwrap();

        assert_eq!(store.draft("d-1").unwrap().id, "d-1");
        assert_eq!(
            store.draft_for_session("s-1").unwrap().unwrap().id,
            "d-1"
        );
        assert!(store.draft_for_session("s-2").unwrap().is_none());
    }

    #[test]
    fn test_create_conflicts_with_existing_session_draft() {
        let store = MemoryStore::new();
        store.save(&make_draft("d-1", "s-1"), None).unwrap();

        let error = store.save(&make_draft("d-2", "s-1"), None).unwrap_err();
        assert_eq!(error.code(), "VERSION_CONFLICT");
    }

    #[test]
    fn test_save_checks_expected_version() {
        let store = MemoryStore::new();
        let draft = make_draft("d-1", "s-1");
        store.save(&draft, None).unwrap();

        let updated = draft.clone().bump_version();
        store.save(&updated, Some(1)).unwrap();
        assert_eq!(store.draft("d-1").unwrap().version, 2);

        // A second writer that also read version 1 loses
        let stale = draft.bump_version();
        let error = store.save(&stale, Some(1)).unwrap_err();
        assert!(matches!(
            error,
            MemoirError::VersionConflict { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.put_session(Session::new("s-1".to_string(), "u-1".to_string()));
        assert!(clone.session("s-1").is_ok());
    }
}
