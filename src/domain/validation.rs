//! Validation rules for stage transitions
//!
//! `validate_transition` is a pure function: edge check against the
//! transition table, the admin gate, then per-target business rules. It
//! returns a `ValidationResult` value; it never fails with an error.

use crate::schemas::{EngineConfig, Stage};

use super::stages::{allowed_transitions, is_admin_only, is_automatic, INITIAL_STAGES};

/// Administrative actor identity supplied with manual transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminActor {
    /// Stable identifier of the actor
    pub id: String,

    /// Display name, if known
    pub name: Option<String>,
}

impl AdminActor {
    /// Create an actor from an id
    pub fn new(id: impl Into<String>) -> Self {
        AdminActor {
            id: id.into(),
            name: None,
        }
    }
}

/// Who is asking for the transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionTrigger {
    /// The engine itself, driven by a completion event
    System,
    /// An administrative actor
    Admin(AdminActor),
}

/// Draft metrics consulted by the approval and review-readiness gates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftMetrics {
    /// Completed interviews reflected in the draft
    pub interview_count: u32,

    /// Total interviews in the owning session
    pub total_interviews: u32,

    /// Mean interview rating, if any interview carried one
    pub overall_rating: Option<f64>,
}

impl DraftMetrics {
    /// Completed/total ratio; zero when the session has no interviews
    pub fn completion_ratio(&self) -> f64 {
        if self.total_interviews == 0 {
            return 0.0;
        }
        f64::from(self.interview_count) / f64::from(self.total_interviews)
    }

    /// Interviews still outstanding
    pub fn remaining(&self) -> u32 {
        self.total_interviews.saturating_sub(self.interview_count)
    }
}

/// Context for validating a single transition.
///
/// Built through the constructors so an admin-triggered context always
/// carries an actor identity; the data conditions the type system cannot
/// express (reason length, approval metrics) stay validator rules.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionContext {
    /// Who triggered the transition
    pub trigger: TransitionTrigger,

    /// Human-readable reason for the transition
    pub reason: Option<String>,

    /// Justification for a rejection, if that is the target
    pub rejection_reason: Option<String>,

    /// Metrics of the draft under transition
    pub metrics: Option<DraftMetrics>,
}

impl TransitionContext {
    /// Context for an automatic, engine-driven transition
    pub fn system() -> Self {
        TransitionContext {
            trigger: TransitionTrigger::System,
            reason: None,
            rejection_reason: None,
            metrics: None,
        }
    }

    /// Context for an administrator-requested transition
    pub fn admin(actor: AdminActor) -> Self {
        TransitionContext {
            trigger: TransitionTrigger::Admin(actor),
            reason: None,
            rejection_reason: None,
            metrics: None,
        }
    }

    /// Return a new context with the given reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Return a new context with the given rejection justification
    pub fn with_rejection_reason(mut self, reason: impl Into<String>) -> Self {
        self.rejection_reason = Some(reason.into());
        self
    }

    /// Return a new context with the given draft metrics
    pub fn with_metrics(mut self, metrics: DraftMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Whether this context represents an administrative action
    pub fn is_admin_action(&self) -> bool {
        matches!(self.trigger, TransitionTrigger::Admin(_))
    }

    /// Administrative actor id, if any
    pub fn admin_id(&self) -> Option<&str> {
        match &self.trigger {
            TransitionTrigger::Admin(actor) => Some(actor.id.as_str()),
            TransitionTrigger::System => None,
        }
    }

    /// Justification text for a rejection: the dedicated field wins,
    /// falling back to the generic reason.
    pub fn rejection_justification(&self) -> Option<&str> {
        self.rejection_reason
            .as_deref()
            .or(self.reason.as_deref())
    }
}

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    pub reason: Option<String>,

    /// Whether the target stage requires an administrative actor
    pub requires_admin: bool,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            reason: None,
            requires_admin: false,
        }
    }

    /// Create a failed validation result
    pub fn failure(reason: impl Into<String>) -> Self {
        ValidationResult {
            valid: false,
            reason: Some(reason.into()),
            requires_admin: false,
        }
    }

    /// Mark the result as concerning an admin-only target
    pub fn admin_required(mut self) -> Self {
        self.requires_admin = true;
        self
    }
}

/// Check the edge for an initial creation (no current stage).
fn check_initial(target: Stage) -> ValidationResult {
    if INITIAL_STAGES.contains(&target) {
        ValidationResult::success()
    } else {
        ValidationResult::failure(format!("{} is not a valid initial stage", target))
    }
}

/// Check the edge for a transition from an existing stage.
fn check_edge(current: Stage, target: Stage) -> ValidationResult {
    if allowed_transitions(current).contains(&target) {
        return ValidationResult::success();
    }
    match current {
        Stage::Archived => {
            ValidationResult::failure("archived drafts accept no further transitions")
        }
        Stage::Approved => ValidationResult::failure(
            "approved drafts accept no further transitions except archival",
        ),
        _ => ValidationResult::failure(format!(
            "cannot transition from {} to {}",
            current, target
        )),
    }
}

/// Admin gate: entering an admin-only stage needs an administrative actor
/// with a non-empty identity.
fn check_admin_gate(target: Stage, ctx: &TransitionContext) -> ValidationResult {
    if !is_admin_only(target) {
        return ValidationResult::success();
    }
    match ctx.admin_id() {
        None => ValidationResult::failure(format!(
            "transition to {} requires an administrative actor",
            target
        ))
        .admin_required(),
        Some(id) if id.trim().is_empty() => {
            ValidationResult::failure("administrative actor identity is empty").admin_required()
        }
        Some(_) => ValidationResult::success().admin_required(),
    }
}

/// Approval gate: enough interviews completed and a good enough rating.
fn check_approval_gate(ctx: &TransitionContext, config: &EngineConfig) -> ValidationResult {
    let metrics = match ctx.metrics {
        Some(m) => m,
        None => return ValidationResult::failure("approval metrics unavailable"),
    };
    let ratio = metrics.completion_ratio();
    if ratio < config.approval_completion_ratio {
        return ValidationResult::failure(format!(
            "approval requires at least {:.0}% interview completion, currently {:.0}%",
            config.approval_completion_ratio * 100.0,
            ratio * 100.0
        ));
    }
    match metrics.overall_rating {
        Some(rating) if rating >= config.min_approval_rating => ValidationResult::success(),
        Some(rating) => ValidationResult::failure(format!(
            "approval requires a rating of at least {:.1}, currently {:.1}",
            config.min_approval_rating, rating
        )),
        None => ValidationResult::failure("approval requires a rated draft, no ratings recorded"),
    }
}

/// Review readiness: every interview in the session must be completed.
fn check_review_readiness(ctx: &TransitionContext) -> ValidationResult {
    let metrics = match ctx.metrics {
        Some(m) => m,
        None => return ValidationResult::failure("completion metrics unavailable"),
    };
    if metrics.total_interviews > 0 && metrics.remaining() == 0 {
        ValidationResult::success()
    } else {
        ValidationResult::failure(format!(
            "review requires all interviews completed, {} remaining",
            metrics.remaining()
        ))
    }
}

/// Rejection justification: a trimmed reason of a minimum length.
fn check_rejection_reason(ctx: &TransitionContext, config: &EngineConfig) -> ValidationResult {
    let justification = ctx.rejection_justification().map(str::trim).unwrap_or("");
    if justification.len() >= config.min_rejection_reason_len {
        ValidationResult::success()
    } else {
        ValidationResult::failure(format!(
            "rejection requires a justification of at least {} characters",
            config.min_rejection_reason_len
        ))
    }
}

/// Validate a stage transition.
///
/// `current = None` is the initial-creation case: the target must be one of
/// the automatic stages. All checks must pass; the first failure wins and
/// carries the failing condition in its reason.
pub fn validate_transition(
    current: Option<Stage>,
    target: Stage,
    ctx: &TransitionContext,
    config: &EngineConfig,
) -> ValidationResult {
    let requires_admin = is_admin_only(target);

    let edge = match current {
        None => check_initial(target),
        Some(current) => check_edge(current, target),
    };
    if !edge.valid {
        return if requires_admin { edge.admin_required() } else { edge };
    }

    let gate = check_admin_gate(target, ctx);
    if !gate.valid {
        return gate;
    }

    let rule = match target {
        Stage::Approved => check_approval_gate(ctx, config),
        Stage::PendingReview => check_review_readiness(ctx),
        Stage::Rejected => check_rejection_reason(ctx, config),
        _ => ValidationResult::success(),
    };
    if !rule.valid {
        return if requires_admin { rule.admin_required() } else { rule };
    }

    if requires_admin {
        ValidationResult::success().admin_required()
    } else {
        ValidationResult::success()
    }
}

/// One candidate transition out of a stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionCandidate {
    /// Target stage of the candidate edge
    pub target: Stage,

    /// Whether the full validation passes in the given context
    pub valid: bool,

    /// Failure reason, if any
    pub reason: Option<String>,

    /// Whether entering the target requires an administrative actor
    pub requires_admin: bool,

    /// Whether the engine can assign the target automatically
    pub automatic: bool,
}

/// Enumerate the edge set for a stage, running the full validation for
/// each candidate in the given context.
pub fn available_transitions(
    stage: Stage,
    ctx: &TransitionContext,
    config: &EngineConfig,
) -> Vec<TransitionCandidate> {
    allowed_transitions(stage)
        .iter()
        .map(|&target| {
            let result = validate_transition(Some(stage), target, ctx, config);
            TransitionCandidate {
                target,
                valid: result.valid,
                reason: result.reason,
                requires_admin: result.requires_admin,
                automatic: is_automatic(target),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stages::STAGES;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn admin_ctx() -> TransitionContext {
        TransitionContext::admin(AdminActor::new("admin-1"))
    }

    fn metrics(count: u32, total: u32, rating: Option<f64>) -> DraftMetrics {
        DraftMetrics {
            interview_count: count,
            total_interviews: total,
            overall_rating: rating,
        }
    }

    #[test]
    fn test_initial_creation_allows_automatic_stages() {
        let ctx = TransitionContext::system().with_metrics(metrics(3, 3, Some(4.0)));
        for &stage in INITIAL_STAGES {
            let result = validate_transition(None, stage, &ctx, &config());
            assert!(result.valid, "initial {} should be valid: {:?}", stage, result.reason);
        }
    }

    #[test]
    fn test_initial_creation_rejects_other_stages() {
        let ctx = admin_ctx().with_metrics(metrics(3, 3, Some(4.0)));
        for &stage in STAGES {
            if INITIAL_STAGES.contains(&stage) {
                continue;
            }
            let result = validate_transition(None, stage, &ctx, &config());
            assert!(!result.valid, "initial {} should be invalid", stage);
        }
    }

    #[test]
    fn test_edges_not_in_table_are_invalid() {
        let ctx = admin_ctx()
            .with_metrics(metrics(3, 3, Some(4.5)))
            .with_rejection_reason("a sufficiently long justification");
        for &from in STAGES {
            for &to in STAGES {
                if allowed_transitions(from).contains(&to) {
                    continue;
                }
                let result = validate_transition(Some(from), to, &ctx, &config());
                assert!(!result.valid, "{} -> {} should be invalid", from, to);
            }
        }
    }

    #[test]
    fn test_admin_only_target_rejects_system_trigger() {
        let ctx = TransitionContext::system().with_metrics(metrics(3, 3, Some(4.0)));
        let result = validate_transition(Some(Stage::InProgress), Stage::UnderReview, &ctx, &config());
        assert!(!result.valid);
        assert!(result.requires_admin);
        assert!(result.reason.unwrap().contains("administrative actor"));
    }

    #[test]
    fn test_admin_only_target_rejects_blank_identity() {
        let ctx = TransitionContext::admin(AdminActor::new("  "));
        let result = validate_transition(Some(Stage::InProgress), Stage::UnderReview, &ctx, &config());
        assert!(!result.valid);
        assert!(result.requires_admin);
    }

    #[test]
    fn test_admin_target_accepts_admin_trigger() {
        let result =
            validate_transition(Some(Stage::InProgress), Stage::UnderReview, &admin_ctx(), &config());
        assert!(result.valid);
        assert!(result.requires_admin);
    }

    #[test]
    fn test_automatic_target_does_not_require_admin() {
        let ctx = TransitionContext::system();
        let result = validate_transition(Some(Stage::InProgress), Stage::FirstDraft, &ctx, &config());
        assert!(result.valid);
        assert!(!result.requires_admin);
    }

    #[test]
    fn test_approval_gate_completion_ratio() {
        let ctx = admin_ctx().with_metrics(metrics(1, 3, Some(4.5)));
        let result = validate_transition(Some(Stage::PendingReview), Stage::Approved, &ctx, &config());
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("completion"));
    }

    #[test]
    fn test_approval_gate_rating() {
        let ctx = admin_ctx().with_metrics(metrics(3, 3, Some(1.5)));
        let result = validate_transition(Some(Stage::PendingReview), Stage::Approved, &ctx, &config());
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("rating"));
    }

    #[test]
    fn test_approval_gate_missing_rating_fails() {
        let ctx = admin_ctx().with_metrics(metrics(3, 3, None));
        let result = validate_transition(Some(Stage::PendingReview), Stage::Approved, &ctx, &config());
        assert!(!result.valid);
    }

    #[test]
    fn test_approval_gate_missing_metrics_fails_closed() {
        let result =
            validate_transition(Some(Stage::PendingReview), Stage::Approved, &admin_ctx(), &config());
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("unavailable"));
    }

    #[test]
    fn test_approval_passes_at_exact_thresholds() {
        // 2 of 3 completed is about 67%, above the 50% floor; rating exactly 2.0
        let ctx = admin_ctx().with_metrics(metrics(2, 3, Some(2.0)));
        let result = validate_transition(Some(Stage::PendingReview), Stage::Approved, &ctx, &config());
        assert!(result.valid, "{:?}", result.reason);
    }

    #[test]
    fn test_review_readiness_requires_full_completion() {
        let ctx = TransitionContext::system().with_metrics(metrics(2, 3, Some(4.0)));
        let result =
            validate_transition(Some(Stage::InProgress), Stage::PendingReview, &ctx, &config());
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("1 remaining"));
    }

    #[test]
    fn test_review_readiness_passes_at_full_completion() {
        let ctx = TransitionContext::system().with_metrics(metrics(3, 3, Some(4.0)));
        let result =
            validate_transition(Some(Stage::InProgress), Stage::PendingReview, &ctx, &config());
        assert!(result.valid, "{:?}", result.reason);
    }

    #[test]
    fn test_review_readiness_rejects_empty_session() {
        let ctx = TransitionContext::system().with_metrics(metrics(0, 0, None));
        let result =
            validate_transition(Some(Stage::InProgress), Stage::PendingReview, &ctx, &config());
        assert!(!result.valid);
    }

    #[test]
    fn test_rejection_requires_long_enough_reason() {
        let short = admin_ctx().with_rejection_reason("bad");
        let result =
            validate_transition(Some(Stage::PendingReview), Stage::Rejected, &short, &config());
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("10 characters"));

        let long = admin_ctx().with_rejection_reason("the narrative needs restructuring");
        let result =
            validate_transition(Some(Stage::PendingReview), Stage::Rejected, &long, &config());
        assert!(result.valid);
    }

    #[test]
    fn test_rejection_reason_is_trimmed() {
        let padded = admin_ctx().with_rejection_reason("   bad    ");
        let result =
            validate_transition(Some(Stage::PendingReview), Stage::Rejected, &padded, &config());
        assert!(!result.valid);
    }

    #[test]
    fn test_rejection_falls_back_to_generic_reason() {
        let ctx = admin_ctx().with_reason("chapter ordering is wrong throughout");
        let result =
            validate_transition(Some(Stage::PendingReview), Stage::Rejected, &ctx, &config());
        assert!(result.valid);
    }

    #[test]
    fn test_terminal_lock_messages() {
        let ctx = admin_ctx().with_metrics(metrics(3, 3, Some(4.0)));

        let from_archived =
            validate_transition(Some(Stage::Archived), Stage::InProgress, &ctx, &config());
        assert!(!from_archived.valid);
        assert!(from_archived.reason.unwrap().contains("archived"));

        let from_approved =
            validate_transition(Some(Stage::Approved), Stage::InProgress, &ctx, &config());
        assert!(!from_approved.valid);
        assert!(from_approved.reason.unwrap().contains("archival"));

        let archive = validate_transition(Some(Stage::Approved), Stage::Archived, &ctx, &config());
        assert!(archive.valid);
    }

    #[test]
    fn test_available_transitions_enumerates_edge_set() {
        let ctx = admin_ctx()
            .with_metrics(metrics(3, 3, Some(4.5)))
            .with_rejection_reason("needs another pass at the ending");
        let candidates = available_transitions(Stage::PendingReview, &ctx, &config());

        assert_eq!(candidates.len(), 3);
        let targets: Vec<Stage> = candidates.iter().map(|c| c.target).collect();
        assert_eq!(targets, vec![Stage::UnderReview, Stage::Approved, Stage::Rejected]);
        assert!(candidates.iter().all(|c| c.valid));
        assert!(candidates.iter().all(|c| c.requires_admin));
        assert!(candidates.iter().all(|c| !c.automatic));
    }

    #[test]
    fn test_available_transitions_marks_invalid_candidates() {
        // System context cannot enter admin-only stages
        let ctx = TransitionContext::system().with_metrics(metrics(3, 3, Some(4.0)));
        let candidates = available_transitions(Stage::InProgress, &ctx, &config());

        let to_pending: &TransitionCandidate = candidates
            .iter()
            .find(|c| c.target == Stage::PendingReview)
            .unwrap();
        assert!(to_pending.valid);
        assert!(to_pending.automatic);

        let to_review = candidates
            .iter()
            .find(|c| c.target == Stage::UnderReview)
            .unwrap();
        assert!(!to_review.valid);
        assert!(to_review.requires_admin);
    }

    #[test]
    fn test_archived_has_no_candidates() {
        let candidates = available_transitions(Stage::Archived, &admin_ctx(), &config());
        assert!(candidates.is_empty());
    }
}
