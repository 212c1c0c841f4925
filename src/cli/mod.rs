//! CLI module for memoir
//!
//! Provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Memoir - life-story draft lifecycle management over recorded interviews
#[derive(Parser, Debug)]
#[command(name = "memoir")]
#[command(version)]
#[command(about = "Manage life-story drafts assembled from recorded interviews")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress info-level output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Preview operations without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override the working directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a memoir data root in the current directory
    Init {
        /// Force initialization even if .memoir already exists
        #[arg(long)]
        force: bool,
    },

    /// Ingest an interview-completion event from a JSON file (or - for stdin)
    Ingest {
        /// Path to the completed-interview JSON, or - for stdin
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Request an administrative stage transition for a draft
    Transition {
        /// Draft ID
        id: String,

        /// Target stage (e.g. under_review, approved, rejected, archived)
        stage: String,

        /// Administrative actor id
        #[arg(long)]
        actor: String,

        /// Reason for the transition
        #[arg(long)]
        reason: Option<String>,

        /// Justification when the target stage is rejected
        #[arg(long)]
        rejection_reason: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of a specific draft
    Show {
        /// Draft ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List drafts with optional stage filtering
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Filter by stage (first_draft, in_progress, pending_review, ...)
        #[arg(long)]
        stage: Option<String>,
    },

    /// Show draft counts per stage
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the audit trail of a draft
    History {
        /// Draft ID
        id: String,

        /// Filter by action (created, version_updated, content_updated, manual_stage_transition)
        #[arg(long)]
        action: Option<String>,

        /// Filter by trigger ("system" or an admin actor id)
        #[arg(long)]
        actor: Option<String>,

        /// Only entries at or after this RFC 3339 instant
        #[arg(long)]
        from: Option<String>,

        /// Only entries at or before this RFC 3339 instant
        #[arg(long)]
        to: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the validated transition candidates for a draft
    Transitions {
        /// Draft ID
        id: String,

        /// Evaluate as this administrative actor instead of the system
        #[arg(long)]
        actor: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
