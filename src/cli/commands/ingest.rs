//! Ingest command - Feed an interview-completion event to the engine
//!
//! This is the CLI stand-in for the webhook path: it consumes an
//! already-structured completed-interview record produced by the external
//! pipeline.

use std::io::Read;
use std::path::Path;

use crate::domain::CompletionAction;
use crate::errors::{MemoirError, Result};
use crate::schemas::Interview;

use super::open_engine;

/// Ingest a completed-interview event from a JSON file or stdin
pub async fn run(cwd: Option<&Path>, file: &Path, json: bool, dry_run: bool) -> Result<()> {
    let content = if file == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MemoirError::FileNotFound(format!("File not found: {}", file.display()))
            } else {
                MemoirError::Io(e)
            }
        })?
    };
    let interview: Interview = serde_json::from_str(&content)
        .map_err(|e| MemoirError::InvalidJson(format!("Invalid interview event: {}", e)))?;

    if dry_run {
        println!(
            "Would ingest completion of interview {} for session {}",
            interview.id, interview.session_id
        );
        return Ok(());
    }

    let engine = open_engine(cwd)?;
    let result = engine.handle_completion(&interview)?;

    if json {
        let output = serde_json::json!({
            "action": result.action.to_string(),
            "message": result.message,
            "draft": result.draft,
            "changes": result.changes,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("{}", result.message);
    match result.action {
        CompletionAction::NoChange => {}
        _ => {
            println!(
                "  draft {} v{} stage={} progress={}%",
                result.draft.id, result.draft.version, result.draft.stage, result.draft.progress.overall
            );
            if let Some(changes) = &result.changes {
                if !changes.new_interviews.is_empty() {
                    println!("  new interviews: {}", changes.new_interviews.join(", "));
                }
                if let Some(delta) = changes.rating_delta {
                    println!("  rating delta: {:+.2}", delta);
                }
                if changes.stage_retained {
                    println!("  note: computed stage refused, current stage retained");
                }
            }
        }
    }
    Ok(())
}
