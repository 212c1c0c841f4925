//! Transition record schema - the append-only audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Stage;

/// Action label of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionAction {
    /// Initial creation of the draft
    Created,
    /// New version produced because the completed-interview set grew
    VersionUpdated,
    /// New version produced by a significant rating change alone
    ContentUpdated,
    /// Administrator-requested stage change
    ManualStageTransition,
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionAction::Created => write!(f, "created"),
            TransitionAction::VersionUpdated => write!(f, "version_updated"),
            TransitionAction::ContentUpdated => write!(f, "content_updated"),
            TransitionAction::ManualStageTransition => write!(f, "manual_stage_transition"),
        }
    }
}

impl std::str::FromStr for TransitionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(TransitionAction::Created),
            "version_updated" => Ok(TransitionAction::VersionUpdated),
            "content_updated" => Ok(TransitionAction::ContentUpdated),
            "manual_stage_transition" => Ok(TransitionAction::ManualStageTransition),
            _ => Err(format!("Unknown transition action: {}", s)),
        }
    }
}

/// Who triggered a transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggeredBy {
    /// Automatic transition driven by a completion event
    System,
    /// Administrative actor identified by id
    Admin { id: String },
}

impl std::fmt::Display for TriggeredBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggeredBy::System => write!(f, "system"),
            TriggeredBy::Admin { id } => write!(f, "{}", id),
        }
    }
}

/// Snapshot of stage metadata at the time a transition was recorded.
///
/// Metadata definitions can evolve; the trail keeps what was true then.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSnapshot {
    /// Human-readable stage description
    pub description: String,

    /// Whether the draft content was editable at this stage
    pub allow_edit: bool,

    /// Whether the draft could be deleted at this stage
    pub allow_delete: bool,
}

/// One immutable entry in a draft's audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Unique identifier for the record
    pub id: String,

    /// What kind of change this entry records
    pub action: TransitionAction,

    /// Stage before the transition (null for initial creation)
    #[serde(default)]
    pub from_stage: Option<Stage>,

    /// Stage after the transition
    pub to_stage: Stage,

    /// Draft version at the time of the transition
    pub version: u32,

    /// When the transition was applied
    pub occurred_at: DateTime<Utc>,

    /// Who triggered the transition
    pub triggered_by: TriggeredBy,

    /// Human-readable reason
    pub reason: String,

    /// Metadata snapshot of the from-stage (null for initial creation)
    #[serde(default)]
    pub from_snapshot: Option<StageSnapshot>,

    /// Metadata snapshot of the to-stage
    pub to_snapshot: StageSnapshot,
}

/// Filters for querying a draft's history
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    /// Only entries with this action label
    pub action: Option<TransitionAction>,

    /// Only entries triggered by this actor
    pub triggered_by: Option<TriggeredBy>,

    /// Only entries at or after this instant
    pub from: Option<DateTime<Utc>>,

    /// Only entries at or before this instant
    pub to: Option<DateTime<Utc>>,
}

impl TransitionRecord {
    /// Check whether this record passes the given filter
    pub fn matches(&self, filter: &HistoryFilter) -> bool {
        if let Some(action) = filter.action {
            if self.action != action {
                return false;
            }
        }
        if let Some(by) = &filter.triggered_by {
            if &self.triggered_by != by {
                return false;
            }
        }
        if let Some(from) = filter.from {
            if self.occurred_at < from {
                return false;
            }
        }
        if let Some(to) = filter.to {
            if self.occurred_at > to {
                return false;
            }
        }
        true
    }
}
