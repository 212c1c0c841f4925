//! Draft lifecycle orchestration
//!
//! The versioning engine decides, on every interview-completion event,
//! whether a draft is created, re-versioned or left unchanged, and runs the
//! administrative transition path. All writes go through the injected
//! repositories; calls for the same session are serialized so racing
//! completions cannot both read the same current version.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{MemoirError, Result};
use crate::schemas::{
    Draft, DraftChanges, EngineConfig, HistoryFilter, Interview, Stage, TransitionAction,
    TransitionRecord,
};
use crate::store::{DraftRepository, SessionRepository};

use super::aggregation::{aggregate, Aggregation};
use super::history::record_transition;
use super::stages::stage_for_completion;
use super::validation::{
    available_transitions, validate_transition, DraftMetrics, TransitionCandidate,
    TransitionContext, TransitionTrigger, ValidationResult,
};

/// What a completion event did to the session's draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionAction {
    /// A new draft was created at version 1
    Created,
    /// The existing draft was re-versioned
    Updated,
    /// The event carried nothing new; the draft was left untouched
    NoChange,
}

impl std::fmt::Display for CompletionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionAction::Created => write!(f, "created"),
            CompletionAction::Updated => write!(f, "updated"),
            CompletionAction::NoChange => write!(f, "no_change"),
        }
    }
}

/// Result of handling one completion event
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    /// What happened
    pub action: CompletionAction,

    /// The draft after the operation (unchanged for NoChange)
    pub draft: Draft,

    /// Human-readable description of the outcome
    pub message: String,

    /// Structured diff, present for updates
    pub changes: Option<DraftChanges>,
}

/// Outcome of an administrative stage transition
#[derive(Debug, Clone, PartialEq)]
pub enum StageTransitionOutcome {
    /// Transition validated and applied
    Applied {
        /// The draft after the transition
        draft: Draft,
        /// The history entry that was appended
        record: TransitionRecord,
    },
    /// Transition refused by validation; nothing was mutated
    Refused {
        /// The failing validation result
        validation: ValidationResult,
    },
}

impl StageTransitionOutcome {
    /// Check if the transition was applied
    pub fn is_applied(&self) -> bool {
        matches!(self, StageTransitionOutcome::Applied { .. })
    }

    /// The refusal reason, if the transition was refused
    pub fn refusal_reason(&self) -> Option<&str> {
        match self {
            StageTransitionOutcome::Applied { .. } => None,
            StageTransitionOutcome::Refused { validation } => validation.reason.as_deref(),
        }
    }
}

/// The draft lifecycle and versioning engine
pub struct VersioningEngine<D, S> {
    config: EngineConfig,
    drafts: D,
    sessions: S,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<D: DraftRepository, S: SessionRepository> VersioningEngine<D, S> {
    /// Create an engine over the given repositories
    pub fn new(config: EngineConfig, drafts: D, sessions: S) -> Self {
        VersioningEngine {
            config,
            drafts,
            sessions,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Per-session lock. Completion handling and manual transitions for the
    /// same session never interleave within one engine instance.
    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("session lock map poisoned");
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Handle an interview-completion event.
    ///
    /// Creates the session's draft on the first completed interview,
    /// re-versions it when the completed set grew or the rating moved
    /// significantly, and returns a no-op result otherwise. Re-delivery of
    /// an already-reflected interview is a no-op.
    pub fn handle_completion(&self, interview: &Interview) -> Result<CompletionResult> {
        if !interview.is_completed() {
            return Err(MemoirError::InvalidEvent(format!(
                "interview {} has not completed",
                interview.id
            )));
        }

        let lock = self.session_lock(&interview.session_id);
        let _guard = lock.lock().expect("session lock poisoned");

        let session = self
            .sessions
            .session(&interview.session_id)?
            .absorb(interview);
        let aggregation = aggregate(&session, &self.config);

        match self.drafts.draft_for_session(&session.id)? {
            None => self.create_draft(&session.id, &session.user_id, aggregation),
            Some(existing) => self.reversion_draft(existing, aggregation),
        }
    }

    /// Initial creation: version 1, stage from the completion percentage.
    fn create_draft(
        &self,
        session_id: &str,
        user_id: &str,
        aggregation: Aggregation,
    ) -> Result<CompletionResult> {
        if aggregation.interview_count == 0 {
            return Err(MemoirError::InvalidEvent(format!(
                "session {} has no completed interviews",
                session_id
            )));
        }

        let stage = stage_for_completion(aggregation.progress.overall);
        let ctx = TransitionContext::system().with_metrics(Self::metrics_of(&aggregation));
        let validation = validate_transition(None, stage, &ctx, &self.config);
        if !validation.valid {
            return Err(MemoirError::StageTransition(
                validation
                    .reason
                    .unwrap_or_else(|| "initial stage refused".to_string()),
            ));
        }

        let record = record_transition(
            TransitionAction::Created,
            None,
            stage,
            1,
            &TransitionTrigger::System,
            format!(
                "draft created from {} completed interview(s)",
                aggregation.interview_count
            ),
        );
        let draft = Draft::new(
            Uuid::new_v4().to_string(),
            session_id.to_string(),
            user_id.to_string(),
            stage,
            aggregation.content,
            aggregation.progress,
            aggregation.interview_count,
            aggregation.total_interviews,
        )
        .with_history_entry(record);

        self.drafts.save(&draft, None)?;
        info!(session = session_id, draft = %draft.id, stage = %stage, "draft created");

        Ok(CompletionResult {
            message: format!("draft created at stage {}", stage),
            action: CompletionAction::Created,
            draft,
            changes: None,
        })
    }

    /// Re-versioning: bump the version when the completed set grew or the
    /// rating moved significantly, otherwise report no change.
    fn reversion_draft(&self, existing: Draft, aggregation: Aggregation) -> Result<CompletionResult> {
        let count_grew = aggregation.interview_count > existing.interview_count;
        let rating_moved = self.rating_moved(existing.overall_rating(), aggregation.overall_rating);

        if !count_grew && !rating_moved {
            debug!(draft = %existing.id, "completion event carried no material change");
            return Ok(CompletionResult {
                message: "no material change; draft left at current version".to_string(),
                action: CompletionAction::NoChange,
                draft: existing,
                changes: None,
            });
        }

        let candidate = stage_for_completion(aggregation.progress.overall);
        let mut changes = self.diff(&existing, &aggregation);
        changes.previous_stage = Some(existing.stage);

        let new_stage = if candidate == existing.stage {
            existing.stage
        } else {
            let ctx = TransitionContext::system().with_metrics(Self::metrics_of(&aggregation));
            let validation = validate_transition(Some(existing.stage), candidate, &ctx, &self.config);
            if validation.valid {
                candidate
            } else {
                // Lenient degrade: keep the current stage, update anyway.
                warn!(
                    session = %existing.session_id,
                    draft = %existing.id,
                    current = %existing.stage,
                    refused = %candidate,
                    reason = validation.reason.as_deref().unwrap_or("unspecified"),
                    "computed stage refused; retaining current stage"
                );
                changes.stage_retained = true;
                existing.stage
            }
        };
        changes.new_stage = Some(new_stage);

        let action = if count_grew {
            TransitionAction::VersionUpdated
        } else {
            TransitionAction::ContentUpdated
        };
        let mut reason = if count_grew {
            format!("{} new interview(s) completed", changes.new_interviews.len())
        } else {
            "significant rating change".to_string()
        };
        if changes.stage_retained {
            reason.push_str(&format!(" (computed stage {} refused, stage retained)", candidate));
        }

        let new_version = existing.version + 1;
        let record = record_transition(
            action,
            Some(existing.stage),
            new_stage,
            new_version,
            &TransitionTrigger::System,
            reason,
        );

        let expected = existing.version;
        let updated = existing
            .with_content(
                aggregation.content,
                aggregation.progress,
                aggregation.interview_count,
                aggregation.total_interviews,
            )
            .with_stage(new_stage)
            .bump_version()
            .with_history_entry(record);

        self.drafts.save(&updated, Some(expected))?;
        info!(
            draft = %updated.id,
            version = updated.version,
            stage = %updated.stage,
            "draft re-versioned"
        );

        Ok(CompletionResult {
            message: format!("draft updated to version {} at stage {}", updated.version, new_stage),
            action: CompletionAction::Updated,
            draft: updated,
            changes: Some(changes),
        })
    }

    /// Administrative transition path. Validation failures are returned as
    /// a refusal, not an error; nothing is mutated on refusal.
    pub fn transition_draft_stage(
        &self,
        draft_id: &str,
        target: Stage,
        ctx: TransitionContext,
    ) -> Result<StageTransitionOutcome> {
        // Manual transitions keep the version, so the save-time version check
        // cannot catch a racing manual transition; the draft must be read
        // under the session lock.
        let session_id = self.drafts.draft(draft_id)?.session_id;
        let lock = self.session_lock(&session_id);
        let _guard = lock.lock().expect("session lock poisoned");
        let draft = self.drafts.draft(draft_id)?;

        // Metrics always come from the draft itself, not the caller.
        let ctx = ctx.with_metrics(DraftMetrics {
            interview_count: draft.interview_count,
            total_interviews: draft.total_interviews,
            overall_rating: draft.overall_rating(),
        });

        let validation = validate_transition(Some(draft.stage), target, &ctx, &self.config);
        if !validation.valid {
            debug!(
                draft = draft_id,
                target = %target,
                reason = validation.reason.as_deref().unwrap_or("unspecified"),
                "manual transition refused"
            );
            return Ok(StageTransitionOutcome::Refused { validation });
        }

        let actor = ctx
            .admin_id()
            .map(str::to_string)
            .unwrap_or_else(|| "system".to_string());
        let from = draft.stage;
        let mut updated = draft.with_stage(target);
        match target {
            Stage::UnderReview => updated = updated.with_reviewed_by(actor.clone()),
            Stage::Approved => updated = updated.with_approved_by(actor.clone()),
            Stage::Rejected => {
                if let Some(justification) = ctx.rejection_justification() {
                    updated = updated.with_rejection_reason(justification.trim());
                }
            }
            _ => {}
        }

        let reason = ctx
            .reason
            .clone()
            .unwrap_or_else(|| format!("manual transition to {}", target));
        let record = record_transition(
            TransitionAction::ManualStageTransition,
            Some(from),
            target,
            updated.version,
            &ctx.trigger,
            reason,
        );
        let expected = updated.version;
        let updated = updated.with_history_entry(record.clone());

        self.drafts.save(&updated, Some(expected))?;
        info!(draft = %updated.id, from = %from, to = %target, actor = %actor, "stage transitioned");

        Ok(StageTransitionOutcome::Applied {
            draft: updated,
            record,
        })
    }

    /// The audit trail of a draft, optionally filtered.
    pub fn draft_history(
        &self,
        draft_id: &str,
        filter: &HistoryFilter,
    ) -> Result<Vec<TransitionRecord>> {
        let draft = self.drafts.draft(draft_id)?;
        Ok(draft
            .history
            .into_iter()
            .filter(|record| record.matches(filter))
            .collect())
    }

    /// Candidate transitions out of a draft's current stage, each fully
    /// validated in the given context with the draft's own metrics.
    pub fn available_for_draft(
        &self,
        draft_id: &str,
        ctx: TransitionContext,
    ) -> Result<Vec<TransitionCandidate>> {
        let draft = self.drafts.draft(draft_id)?;
        let ctx = ctx.with_metrics(DraftMetrics {
            interview_count: draft.interview_count,
            total_interviews: draft.total_interviews,
            overall_rating: draft.overall_rating(),
        });
        Ok(available_transitions(draft.stage, &ctx, &self.config))
    }

    fn metrics_of(aggregation: &Aggregation) -> DraftMetrics {
        DraftMetrics {
            interview_count: aggregation.interview_count,
            total_interviews: aggregation.total_interviews,
            overall_rating: aggregation.overall_rating,
        }
    }

    /// Rating movement beyond the configured significant-change threshold.
    fn rating_moved(&self, old: Option<f64>, new: Option<f64>) -> bool {
        match (old, new) {
            (None, None) => false,
            (Some(old), Some(new)) => (new - old).abs() > self.config.significant_rating_delta,
            _ => true,
        }
    }

    /// Structured diff between the existing draft and new aggregation.
    fn diff(&self, existing: &Draft, aggregation: &Aggregation) -> DraftChanges {
        let new_interviews = aggregation
            .content
            .interviews
            .iter()
            .filter(|i| !existing.content.contains_interview(&i.id))
            .map(|i| i.id.clone())
            .collect();
        let added_skills = aggregation
            .content
            .professional
            .skills
            .iter()
            .filter(|s| !existing.content.professional.skills.contains(*s))
            .cloned()
            .collect();
        let added_strengths = aggregation
            .content
            .recommendations
            .strengths
            .iter()
            .filter(|s| !existing.content.recommendations.strengths.contains(*s))
            .cloned()
            .collect();
        let rating_delta = match (existing.overall_rating(), aggregation.overall_rating) {
            (Some(old), Some(new)) => Some(round2(new - old)),
            _ => None,
        };

        DraftChanges {
            new_interviews,
            rating_delta,
            added_skills,
            added_strengths,
            previous_stage: None,
            new_stage: None,
            stage_retained: false,
        }
    }
}

/// Round to two decimal places (rating deltas).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
