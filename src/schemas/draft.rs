//! Draft schema - the life-story draft aggregate under lifecycle management

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DraftContent, DraftProgress, TransitionRecord};

/// Lifecycle stage of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Initial draft assembled from a partial interview set
    FirstDraft,
    /// Draft growing as more interviews complete
    InProgress,
    /// All interviews complete, waiting for a reviewer
    PendingReview,
    /// Reviewer actively working on the draft
    UnderReview,
    /// Review finished, waiting for final approval
    PendingApproval,
    /// Approved client-facing artifact
    Approved,
    /// Sent back with a rejection reason
    Rejected,
    /// End of life, no further transitions
    Archived,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::FirstDraft => write!(f, "first_draft"),
            Stage::InProgress => write!(f, "in_progress"),
            Stage::PendingReview => write!(f, "pending_review"),
            Stage::UnderReview => write!(f, "under_review"),
            Stage::PendingApproval => write!(f, "pending_approval"),
            Stage::Approved => write!(f, "approved"),
            Stage::Rejected => write!(f, "rejected"),
            Stage::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_draft" => Ok(Stage::FirstDraft),
            "in_progress" => Ok(Stage::InProgress),
            "pending_review" => Ok(Stage::PendingReview),
            "under_review" => Ok(Stage::UnderReview),
            "pending_approval" => Ok(Stage::PendingApproval),
            "approved" => Ok(Stage::Approved),
            "rejected" => Ok(Stage::Rejected),
            "archived" => Ok(Stage::Archived),
            _ => Err(format!("Unknown stage: {}", s)),
        }
    }
}

/// The evolving life-story draft for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier for the draft
    pub id: String,

    /// Session this draft belongs to
    pub session_id: String,

    /// Client user owning the session
    pub user_id: String,

    /// Revision number, strictly increasing per session, starts at 1
    pub version: u32,

    /// Current lifecycle stage
    pub stage: Stage,

    /// Normalized content aggregated from completed interviews
    pub content: DraftContent,

    /// Derived completion metrics
    pub progress: DraftProgress,

    /// Completed interviews reflected in the content
    pub interview_count: u32,

    /// Total interviews in the owning session
    pub total_interviews: u32,

    /// Reviewer identity, set by the under_review transition
    #[serde(default)]
    pub reviewed_by: Option<String>,

    /// Approver identity, set by the approved transition
    #[serde(default)]
    pub approved_by: Option<String>,

    /// Justification recorded by the rejected transition
    #[serde(default)]
    pub rejection_reason: Option<String>,

    /// Append-only audit trail, extended on every applied transition
    #[serde(default)]
    pub history: Vec<TransitionRecord>,

    /// ISO 8601 creation timestamp
    pub created_at: DateTime<Utc>,

    /// ISO 8601 last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    /// Create a version-1 draft for a session
    pub fn new(
        id: String,
        session_id: String,
        user_id: String,
        stage: Stage,
        content: DraftContent,
        progress: DraftProgress,
        interview_count: u32,
        total_interviews: u32,
    ) -> Self {
        let now = Utc::now();
        Draft {
            schema_version: 1,
            id,
            session_id,
            user_id,
            version: 1,
            stage,
            content,
            progress,
            interview_count,
            total_interviews,
            reviewed_by: None,
            approved_by: None,
            rejection_reason: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mean rating currently reflected in the draft content
    pub fn overall_rating(&self) -> Option<f64> {
        self.content.recommendations.overall_rating
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Draft with the given stage, updating the timestamp
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self.touch_returning()
    }

    /// Return a new Draft with replaced content and progress metrics
    pub fn with_content(
        mut self,
        content: DraftContent,
        progress: DraftProgress,
        interview_count: u32,
        total_interviews: u32,
    ) -> Self {
        self.content = content;
        self.progress = progress;
        self.interview_count = interview_count;
        self.total_interviews = total_interviews;
        self.touch_returning()
    }

    /// Return a new Draft with the version bumped by exactly one
    pub fn bump_version(mut self) -> Self {
        self.version += 1;
        self.touch_returning()
    }

    /// Return a new Draft with the reviewer identity set
    pub fn with_reviewed_by(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewed_by = Some(reviewer.into());
        self.touch_returning()
    }

    /// Return a new Draft with the approver identity set
    pub fn with_approved_by(mut self, approver: impl Into<String>) -> Self {
        self.approved_by = Some(approver.into());
        self.touch_returning()
    }

    /// Return a new Draft with the rejection reason set
    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self.touch_returning()
    }

    /// Return a new Draft with the record appended to the audit trail.
    ///
    /// History is append-only; no method removes or rewrites entries.
    pub fn with_history_entry(mut self, record: TransitionRecord) -> Self {
        self.history.push(record);
        self.touch_returning()
    }

    /// Update the updated_at timestamp to now and return self
    fn touch_returning(mut self) -> Self {
        self.updated_at = Utc::now();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_draft() -> Draft {
        Draft::new(
            "d-1".to_string(),
            "s-1".to_string(),
            "u-1".to_string(),
            Stage::FirstDraft,
            DraftContent::default(),
            DraftProgress::default(),
            1,
            3,
        )
    }

    #[test]
    fn test_stage_serialization() {
        assert_eq!(serde_json::to_string(&Stage::FirstDraft).unwrap(), "\"first_draft\"");
        assert_eq!(serde_json::to_string(&Stage::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(serde_json::to_string(&Stage::PendingReview).unwrap(), "\"pending_review\"");
        assert_eq!(serde_json::to_string(&Stage::UnderReview).unwrap(), "\"under_review\"");
        assert_eq!(
            serde_json::to_string(&Stage::PendingApproval).unwrap(),
            "\"pending_approval\""
        );
        assert_eq!(serde_json::to_string(&Stage::Approved).unwrap(), "\"approved\"");
        assert_eq!(serde_json::to_string(&Stage::Rejected).unwrap(), "\"rejected\"");
        assert_eq!(serde_json::to_string(&Stage::Archived).unwrap(), "\"archived\"");
    }

    #[test]
    fn test_stage_from_str_round_trip() {
        for stage in [
            Stage::FirstDraft,
            Stage::InProgress,
            Stage::PendingReview,
            Stage::UnderReview,
            Stage::PendingApproval,
            Stage::Approved,
            Stage::Rejected,
            Stage::Archived,
        ] {
            let parsed: Stage = stage.to_string().parse().unwrap();
            assert_eq!(parsed, stage);
        }
        assert!("bogus".parse::<Stage>().is_err());
    }

    #[test]
    fn test_new_draft_starts_at_version_one() {
        let draft = make_draft();
        assert_eq!(draft.version, 1);
        assert_eq!(draft.stage, Stage::FirstDraft);
        assert!(draft.history.is_empty());
        assert!(draft.reviewed_by.is_none());
    }

    #[test]
    fn test_bump_version_increments_by_one() {
        let draft = make_draft();
        let bumped = draft.clone().bump_version();
        assert_eq!(bumped.version, draft.version + 1);
        assert_eq!(draft.version, 1); // Original unchanged
    }

    #[test]
    fn test_with_stage_is_immutable() {
        let draft = make_draft();
        let updated = draft.clone().with_stage(Stage::InProgress);
        assert_eq!(updated.stage, Stage::InProgress);
        assert_eq!(draft.stage, Stage::FirstDraft);
        assert!(updated.updated_at >= draft.updated_at);
    }

    #[test]
    fn test_review_fields_set_by_builders() {
        let draft = make_draft()
            .with_reviewed_by("admin-1")
            .with_approved_by("admin-2")
            .with_rejection_reason("needs a second pass on chapter two");

        assert_eq!(draft.reviewed_by.as_deref(), Some("admin-1"));
        assert_eq!(draft.approved_by.as_deref(), Some("admin-2"));
        assert_eq!(
            draft.rejection_reason.as_deref(),
            Some("needs a second pass on chapter two")
        );
    }

    #[test]
    fn test_draft_json_round_trip() {
        let draft = make_draft();
        let json = serde_json::to_string_pretty(&draft).unwrap();
        let parsed: Draft = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, draft.id);
        assert_eq!(parsed.session_id, draft.session_id);
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.stage, Stage::FirstDraft);
    }
}
