//! Transitions command - Validated transition candidates for a draft

use std::path::Path;

use crate::domain::{AdminActor, TransitionContext};
use crate::errors::Result;

use super::open_engine;

/// Show the validated transition candidates for a draft's current stage
pub async fn run(cwd: Option<&Path>, id: &str, actor: Option<&str>, json: bool) -> Result<()> {
    let ctx = match actor {
        Some(actor) => TransitionContext::admin(AdminActor::new(actor)),
        None => TransitionContext::system(),
    };

    let engine = open_engine(cwd)?;
    let candidates = engine.available_for_draft(id, ctx)?;

    if json {
        let output: Vec<_> = candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "target": c.target.to_string(),
                    "valid": c.valid,
                    "reason": c.reason,
                    "requires_admin": c.requires_admin,
                    "automatic": c.automatic,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No transitions out of the current stage");
        return Ok(());
    }
    for candidate in &candidates {
        let marker = if candidate.valid { "ok" } else { "--" };
        let mut notes = Vec::new();
        if candidate.requires_admin {
            notes.push("admin".to_string());
        }
        if candidate.automatic {
            notes.push("automatic".to_string());
        }
        if let Some(reason) = &candidate.reason {
            notes.push(reason.clone());
        }
        let suffix = if notes.is_empty() {
            String::new()
        } else {
            format!("  ({})", notes.join("; "))
        };
        println!("[{}] {}{}", marker, candidate.target, suffix);
    }
    Ok(())
}
