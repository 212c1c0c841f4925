//! Stage metadata and capability checks
//!
//! Pure lookups over the stage enum: display metadata, edit/delete flags,
//! and the per-role capability matrix. None of this mutates a draft.

use crate::schemas::{Stage, StageSnapshot};

use super::stages::{is_admin_only, is_automatic, is_terminal};

/// Descriptive metadata for a stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMetadata {
    /// The stage this metadata describes
    pub stage: Stage,

    /// Human-readable description
    pub description: &'static str,

    /// Whether the draft content may be edited at this stage
    pub allow_edit: bool,

    /// Whether the draft may be deleted at this stage
    pub allow_delete: bool,

    /// Whether entering this stage requires an administrative actor
    pub admin_only: bool,

    /// Whether the engine assigns this stage automatically
    pub automatic: bool,

    /// Whether this stage has no outgoing transitions
    pub terminal: bool,
}

/// Metadata lookup, total over the stage enum.
pub fn stage_metadata(stage: Stage) -> StageMetadata {
    let (description, allow_edit, allow_delete) = match stage {
        Stage::FirstDraft => ("Initial draft assembled from early interviews", true, true),
        Stage::InProgress => ("Draft growing as interviews complete", true, true),
        Stage::PendingReview => ("All interviews complete, awaiting a reviewer", false, false),
        Stage::UnderReview => ("Reviewer working through the draft", false, false),
        Stage::PendingApproval => ("Review done, awaiting final approval", false, false),
        Stage::Approved => ("Approved client-facing artifact", false, false),
        Stage::Rejected => ("Sent back with a rejection reason", true, false),
        Stage::Archived => ("End of life, read-only", false, false),
    };
    StageMetadata {
        stage,
        description,
        allow_edit,
        allow_delete,
        admin_only: is_admin_only(stage),
        automatic: is_automatic(stage),
        terminal: is_terminal(stage),
    }
}

/// Snapshot of a stage's metadata for embedding in a transition record.
pub fn snapshot(stage: Stage) -> StageSnapshot {
    let meta = stage_metadata(stage);
    StageSnapshot {
        description: meta.description.to_string(),
        allow_edit: meta.allow_edit,
        allow_delete: meta.allow_delete,
    }
}

/// Capability an actor may hold over a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    View,
    Edit,
    Delete,
    Approve,
    Reject,
    Archive,
}

/// Role of the actor asking for a capability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    /// The client who owns the session
    Client,
    /// A reviewer reading drafts under review
    Reviewer,
    /// An administrator driving the workflow
    Admin,
}

/// Pure capability check keyed off the stage's edit/delete flags and the
/// actor's role. This is a read-only lookup, not a transition.
pub fn validate_user_permission(stage: Stage, capability: Capability, role: ActorRole) -> bool {
    let meta = stage_metadata(stage);
    match capability {
        Capability::View => true,
        Capability::Edit => meta.allow_edit && matches!(role, ActorRole::Client | ActorRole::Admin),
        Capability::Delete => meta.allow_delete && role == ActorRole::Admin,
        Capability::Approve | Capability::Reject | Capability::Archive => role == ActorRole::Admin,
    }
}
