//! Transition command - Administrative stage transitions

use std::path::Path;

use crate::domain::{AdminActor, StageTransitionOutcome, TransitionContext};
use crate::errors::{MemoirError, Result};
use crate::schemas::Stage;

use super::open_engine;

/// Request an administrative stage transition for a draft
#[allow(clippy::too_many_arguments)]
pub async fn run(
    cwd: Option<&Path>,
    id: &str,
    stage: &str,
    actor: &str,
    reason: Option<&str>,
    rejection_reason: Option<&str>,
    json: bool,
    dry_run: bool,
) -> Result<()> {
    let target: Stage = stage
        .parse()
        .map_err(|_| MemoirError::UnknownStage(stage.to_string()))?;

    let mut ctx = TransitionContext::admin(AdminActor::new(actor));
    if let Some(reason) = reason {
        ctx = ctx.with_reason(reason);
    }
    if let Some(rejection) = rejection_reason {
        ctx = ctx.with_rejection_reason(rejection);
    }

    if dry_run {
        println!("Would request transition of draft {} to {}", id, target);
        return Ok(());
    }

    let engine = open_engine(cwd)?;
    let outcome = engine.transition_draft_stage(id, target, ctx)?;

    if json {
        let output = match &outcome {
            StageTransitionOutcome::Applied { draft, record } => serde_json::json!({
                "success": true,
                "draft": draft,
                "transition": record,
            }),
            StageTransitionOutcome::Refused { validation } => serde_json::json!({
                "success": false,
                "reason": validation.reason,
                "requires_admin": validation.requires_admin,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    match outcome {
        StageTransitionOutcome::Applied { draft, .. } => {
            println!("Draft {} transitioned to {}", draft.id, draft.stage);
        }
        StageTransitionOutcome::Refused { validation } => {
            println!(
                "Transition refused: {}",
                validation.reason.as_deref().unwrap_or("validation failed")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{get_session_path, write_json};
    use crate::schemas::{
        Interview, InterviewContent, InterviewKind, InterviewStatus, Session,
    };
    use crate::store::{DraftRepository, JsonStore};
    use chrono::Utc;
    use tempfile::TempDir;

    async fn seed_draft(temp: &TempDir) -> String {
        std::fs::create_dir_all(temp.path().join(".memoir/sessions")).unwrap();
        std::fs::create_dir_all(temp.path().join(".memoir/drafts")).unwrap();

        let interview = Interview {
            id: "i-1".to_string(),
            session_id: "s-1".to_string(),
            kind: InterviewKind::Technical,
            status: InterviewStatus::Completed,
            interviewer: None,
            completed_at: Some(Utc::now()),
            content: InterviewContent {
                rating: Some(4.5),
                summary: None,
                strengths: vec![],
                improvements: vec![],
                skills: vec![],
            },
        };
        let mut session = Session::new("s-1".to_string(), "u-1".to_string());
        session.interviews = vec![interview.clone()];
        write_json(&get_session_path(temp.path(), "s-1"), &session).unwrap();

        let engine = open_engine(Some(temp.path())).unwrap();
        engine.handle_completion(&interview).unwrap().draft.id
    }

    #[tokio::test]
    async fn test_transition_applies() {
        let temp = TempDir::new().unwrap();
        let draft_id = seed_draft(&temp).await;

        run(
            Some(temp.path()),
            &draft_id,
            "under_review",
            "admin-1",
            None,
            None,
            false,
            false,
        )
        .await
        .unwrap();

        let store = JsonStore::new(temp.path());
        let draft = store.draft(&draft_id).unwrap();
        assert_eq!(draft.stage, Stage::UnderReview);
        assert_eq!(draft.reviewed_by.as_deref(), Some("admin-1"));
    }

    #[tokio::test]
    async fn test_transition_refusal_leaves_draft_alone() {
        let temp = TempDir::new().unwrap();
        let draft_id = seed_draft(&temp).await;

        // first_draft -> approved has no edge; refusal is reported, not an error
        run(
            Some(temp.path()),
            &draft_id,
            "approved",
            "admin-1",
            None,
            None,
            false,
            false,
        )
        .await
        .unwrap();

        let store = JsonStore::new(temp.path());
        let draft = store.draft(&draft_id).unwrap();
        assert_eq!(draft.stage, Stage::FirstDraft);
        assert!(draft.approved_by.is_none());
    }

    #[tokio::test]
    async fn test_transition_unknown_stage() {
        let temp = TempDir::new().unwrap();
        let draft_id = seed_draft(&temp).await;

        let error = run(
            Some(temp.path()),
            &draft_id,
            "bogus",
            "admin-1",
            None,
            None,
            false,
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(error.code(), "UNKNOWN_STAGE");
    }
}
