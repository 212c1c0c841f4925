//! Repositories for sessions and drafts
//!
//! The engine is written against these traits so it can be tested without
//! a live store. Saves take an optimistic-concurrency token: the stored
//! version must match the caller's expectation or the save fails with
//! `VersionConflict`, which is what makes draft version assignment a
//! compare-and-swap.

mod json;
mod memory;

use crate::errors::Result;
use crate::schemas::{Draft, Session};

pub use json::JsonStore;
pub use memory::MemoryStore;

/// Read-only access to the session store
pub trait SessionRepository {
    /// Load a session by id.
    ///
    /// # Errors
    /// * `SessionNotFound` - If no such session exists
    fn session(&self, id: &str) -> Result<Session>;
}

/// Read/write access to the draft store
pub trait DraftRepository {
    /// Load a draft by id.
    ///
    /// # Errors
    /// * `DraftNotFound` - If no such draft exists
    fn draft(&self, id: &str) -> Result<Draft>;

    /// Load the draft belonging to a session, if one exists.
    fn draft_for_session(&self, session_id: &str) -> Result<Option<Draft>>;

    /// Persist a draft with an optimistic concurrency check.
    ///
    /// `expected_version = None` means "create": the save fails if the
    /// session already has a draft. `Some(v)` means "replace": the stored
    /// draft's version must equal `v`.
    ///
    /// # Errors
    /// * `VersionConflict` - If the check fails
    fn save(&self, draft: &Draft, expected_version: Option<u32>) -> Result<()>;

    /// All drafts in the store.
    fn list(&self) -> Result<Vec<Draft>>;
}
