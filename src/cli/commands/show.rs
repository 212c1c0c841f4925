//! Show command - Details of a specific draft

use std::path::Path;

use crate::errors::Result;
use crate::fs::{find_data_root, resolve_cwd};
use crate::store::{DraftRepository, JsonStore};

/// Show details of a specific draft
pub async fn run(cwd: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let root = find_data_root(&resolve_cwd(cwd))?;
    let store = JsonStore::new(&root);
    let draft = store.draft(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&draft).unwrap_or_default());
        return Ok(());
    }

    println!("Draft {} (session {})", draft.id, draft.session_id);
    println!("  stage: {}", draft.stage);
    println!("  version: {}", draft.version);
    println!(
        "  interviews: {}/{} completed ({}%)",
        draft.interview_count, draft.total_interviews, draft.progress.overall
    );
    println!(
        "  progress: personal {}% / professional {}% / recommendations {}%",
        draft.progress.personal, draft.progress.professional, draft.progress.recommendations
    );
    if let Some(rating) = draft.overall_rating() {
        println!("  overall rating: {:.1}", rating);
    }
    if let Some(reviewer) = &draft.reviewed_by {
        println!("  reviewed by: {}", reviewer);
    }
    if let Some(approver) = &draft.approved_by {
        println!("  approved by: {}", approver);
    }
    if let Some(reason) = &draft.rejection_reason {
        println!("  rejection reason: {}", reason);
    }
    for summary in &draft.content.interviews {
        let rating = summary
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!("  [{}] {} rating={}", summary.kind, summary.id, rating);
    }
    Ok(())
}
