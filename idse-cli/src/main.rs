//! `idse` - command-line caller over the artifact spine
//!
//! Binary name: `idse`

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, Commands, SyncAction};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = context::open(&cli.workspace).await?;

    match cli.command {
        Commands::Project { action } => commands::project::run(&ctx, action).await,
        Commands::Session { action } => commands::session::run(&ctx, action).await,
        Commands::Artifact { action } => commands::artifact::run(&ctx, action).await,
        Commands::Claim { action } => commands::claim::run(&ctx, action).await,
        Commands::Validate {
            project,
            session_id,
            complete,
        } => commands::validate::run(&ctx, &project, &session_id, complete).await,
        Commands::Sync { action } => match action {
            SyncAction::Push { project, session_id } => commands::sync::push(&ctx, &project, &session_id).await,
            SyncAction::Pull { project, session_id } => commands::sync::pull(&ctx, &project, &session_id).await,
        },
        Commands::View { project } => commands::view::run(&ctx, &project).await,
    }
}
