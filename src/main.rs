//! Memoir CLI - life-story draft lifecycle management over recorded interviews

use clap::Parser;
use memoir::cli::{Cli, Commands};
use memoir::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing; explicit flags win over RUST_LOG
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

async fn run(cli: Cli) -> memoir::Result<()> {
    match cli.command {
        Some(Commands::Init { force }) => {
            memoir::cli::commands::init::run(cli.cwd.as_deref(), force, cli.dry_run).await
        }
        Some(Commands::Ingest { file, json }) => {
            memoir::cli::commands::ingest::run(cli.cwd.as_deref(), &file, json, cli.dry_run).await
        }
        Some(Commands::Transition {
            id,
            stage,
            actor,
            reason,
            rejection_reason,
            json,
        }) => {
            memoir::cli::commands::transition::run(
                cli.cwd.as_deref(),
                &id,
                &stage,
                &actor,
                reason.as_deref(),
                rejection_reason.as_deref(),
                json,
                cli.dry_run,
            )
            .await
        }
        Some(Commands::Show { id, json }) => {
            memoir::cli::commands::show::run(cli.cwd.as_deref(), &id, json).await
        }
        Some(Commands::List { json, stage }) => {
            memoir::cli::commands::list::run(cli.cwd.as_deref(), json, stage.as_deref()).await
        }
        Some(Commands::Status { json }) => {
            memoir::cli::commands::status::run(cli.cwd.as_deref(), json).await
        }
        Some(Commands::History {
            id,
            action,
            actor,
            from,
            to,
            json,
        }) => {
            memoir::cli::commands::history::run(
                cli.cwd.as_deref(),
                &id,
                action.as_deref(),
                actor.as_deref(),
                from.as_deref(),
                to.as_deref(),
                json,
            )
            .await
        }
        Some(Commands::Transitions { id, actor, json }) => {
            memoir::cli::commands::transitions::run(cli.cwd.as_deref(), &id, actor.as_deref(), json)
                .await
        }
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
