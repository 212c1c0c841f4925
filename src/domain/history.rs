//! History recording
//!
//! Builds immutable transition records from validated transitions. Records
//! are only ever appended to a draft's history, never rewritten.

use chrono::Utc;
use uuid::Uuid;

use crate::schemas::{Stage, TransitionAction, TransitionRecord, TriggeredBy};

use super::metadata::snapshot;
use super::validation::TransitionTrigger;

/// Build a transition record for an already-validated transition.
///
/// The record captures the stage-metadata snapshots of both sides so the
/// trail stays meaningful if metadata definitions change later.
pub fn record_transition(
    action: TransitionAction,
    from: Option<Stage>,
    to: Stage,
    version: u32,
    trigger: &TransitionTrigger,
    reason: impl Into<String>,
) -> TransitionRecord {
    let triggered_by = match trigger {
        TransitionTrigger::System => TriggeredBy::System,
        TransitionTrigger::Admin(actor) => TriggeredBy::Admin {
            id: actor.id.clone(),
        },
    };
    TransitionRecord {
        id: Uuid::new_v4().to_string(),
        action,
        from_stage: from,
        to_stage: to,
        version,
        occurred_at: Utc::now(),
        triggered_by,
        reason: reason.into(),
        from_snapshot: from.map(snapshot),
        to_snapshot: snapshot(to),
    }
}
