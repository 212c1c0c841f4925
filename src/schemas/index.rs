//! Index schema - drafts index cache for listing commands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stage;

/// An entry in the drafts index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Draft id
    pub id: String,

    /// Owning session id
    pub session_id: String,

    /// Current lifecycle stage
    pub stage: Stage,

    /// Current version
    pub version: u32,

    /// Overall completion percentage
    pub progress: u8,
}

/// Index of all drafts (regenerated on every draft write)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// List of index entries
    pub entries: Vec<IndexEntry>,

    /// When the index was generated
    pub generated_at: DateTime<Utc>,
}

impl Index {
    /// Create a new empty index
    pub fn new() -> Self {
        Index {
            schema_version: 1,
            entries: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
