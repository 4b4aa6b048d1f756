// src/bin/admin.rs
use anyhow::Result;
use clap::Parser;
use resume_assistant::admin_cli::{handle_admin_command, AdminCli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = AdminCli::parse();
    handle_admin_command(cli).await
}
