//! History command - Audit trail of a draft

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::errors::{MemoirError, Result};
use crate::schemas::{HistoryFilter, TransitionAction, TriggeredBy};

use super::open_engine;

fn parse_instant(value: &str, flag: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| MemoirError::ConfigError(format!("Invalid --{} value '{}': {}", flag, value, e)))
}

/// Show the audit trail of a draft, optionally filtered
pub async fn run(
    cwd: Option<&Path>,
    id: &str,
    action: Option<&str>,
    actor: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut filter = HistoryFilter::default();
    if let Some(action) = action {
        filter.action = Some(
            action
                .parse::<TransitionAction>()
                .map_err(MemoirError::ConfigError)?,
        );
    }
    if let Some(actor) = actor {
        filter.triggered_by = Some(if actor == "system" {
            TriggeredBy::System
        } else {
            TriggeredBy::Admin { id: actor.to_string() }
        });
    }
    if let Some(from) = from {
        filter.from = Some(parse_instant(from, "from")?);
    }
    if let Some(to) = to {
        filter.to = Some(parse_instant(to, "to")?);
    }

    let engine = open_engine(cwd)?;
    let records = engine.draft_history(id, &filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records).unwrap_or_default());
        return Ok(());
    }

    if records.is_empty() {
        println!("No matching history entries");
        return Ok(());
    }
    for record in &records {
        let from_stage = record
            .from_stage
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {} -> {}  v{}  by {}  {}",
            record.occurred_at.to_rfc3339(),
            record.action,
            from_stage,
            record.to_stage,
            record.version,
            record.triggered_by,
            record.reason
        );
    }
    Ok(())
}
