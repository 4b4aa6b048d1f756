// src/admin_cli.rs
//! Operator-side user management: pre-register, list, check and deactivate
//! profiles without going through the identity provider.

use crate::core::database::{DatabaseConfig, ProfileRepository};
use crate::utils::is_valid_email;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "resumate-admin")]
#[command(about = "Manage user profiles for the Resumate backend")]
pub struct AdminCli {
    #[command(subcommand)]
    pub command: AdminCommand,

    #[arg(long, default_value = "resumate.db")]
    pub database_path: PathBuf,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Pre-register a profile for an email address
    Add {
        email: String,
        #[arg(long)]
        display_name: Option<String>,
    },
    /// Deactivate a profile by email
    Remove { email: String },
    /// List all active profiles
    List,
    /// Check whether an email has a profile
    Check { email: String },
    /// Import profiles from a CSV file (email,display_name)
    Import { csv_file: PathBuf },
    /// Initialize the database
    Init,
}

/// Pre-registered rows get a placeholder subject; the real identity subject
/// is claimed on the user's first login.
fn invited_subject() -> String {
    format!("invited:{}", uuid::Uuid::new_v4())
}

pub async fn handle_admin_command(cli: AdminCli) -> Result<()> {
    let mut db_config = DatabaseConfig::new(cli.database_path.clone());
    db_config.init_pool().await?;
    db_config.migrate().await?;

    let pool = db_config.pool()?;
    let repo = ProfileRepository::new(pool);

    match cli.command {
        AdminCommand::Add {
            email,
            display_name,
        } => {
            if !is_valid_email(&email) {
                info!("❌ Invalid email address: {}", email);
                return Ok(());
            }

            if repo.find_by_email(&email).await?.is_some() {
                info!("❌ Profile already exists for: {}", email);
                return Ok(());
            }

            match repo
                .create(&invited_subject(), &email, display_name.as_deref())
                .await
            {
                Ok(profile) => {
                    info!("✅ Profile created:");
                    info!("   Email: {}", email);
                    info!("   ID: {}", profile.id);
                }
                Err(e) => {
                    error!("Failed to create profile: {}", e);
                    info!("❌ Error: {}", e);
                }
            }
        }

        AdminCommand::Remove { email } => match repo.deactivate_by_email(&email).await {
            Ok(true) => {
                info!("✅ Profile deactivated for email: {}", email);
            }
            Ok(false) => {
                info!("❌ No active profile found for email: {}", email);
            }
            Err(e) => {
                error!("Failed to deactivate profile: {}", e);
                info!("❌ Error: {}", e);
            }
        },

        AdminCommand::List => match repo.list_active().await {
            Ok(profiles) => {
                if profiles.is_empty() {
                    info!("No active profiles found.");
                } else {
                    info!("Active profiles:");
                    info!(
                        "{:<5} {:<30} {:<20} {:<20}",
                        "ID", "Email", "Name", "Created"
                    );
                    info!("{}", "-".repeat(75));

                    for profile in profiles {
                        info!(
                            "{:<5} {:<30} {:<20} {:<20}",
                            profile.id,
                            profile.email,
                            profile.display_name.as_deref().unwrap_or("-"),
                            profile.created_at.format("%Y-%m-%d %H:%M")
                        );
                    }
                }
            }
            Err(e) => {
                error!("Failed to list profiles: {}", e);
                info!("❌ Error: {}", e);
            }
        },

        AdminCommand::Check { email } => match repo.find_by_email(&email).await {
            Ok(Some(profile)) => {
                info!("✅ Email '{}' has a profile (ID: {})", email, profile.id);
                info!(
                    "   Created: {}",
                    profile.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
            }
            Ok(None) => {
                info!("❌ No profile found for '{}'", email);
            }
            Err(e) => {
                error!("Failed to check email: {}", e);
                info!("❌ Error: {}", e);
            }
        },

        AdminCommand::Import { csv_file } => {
            if !csv_file.exists() {
                info!("❌ CSV file not found: {}", csv_file.display());
                return Ok(());
            }

            let content = tokio::fs::read_to_string(&csv_file).await?;
            let mut reader = csv::Reader::from_reader(content.as_bytes());

            let mut success_count = 0;
            let mut error_count = 0;

            for result in reader.records() {
                match result {
                    Ok(record) => {
                        let email = record.get(0).unwrap_or("").trim();
                        let display_name = record.get(1).map(str::trim).filter(|s| !s.is_empty());

                        if !is_valid_email(email) {
                            error_count += 1;
                            info!("⚠️  Skipping invalid email: {}", email);
                            continue;
                        }

                        if repo.find_by_email(email).await?.is_some() {
                            info!("⚠️  Skipped (already exists): {}", email);
                            continue;
                        }

                        match repo.create(&invited_subject(), email, display_name).await {
                            Ok(_) => {
                                success_count += 1;
                                info!("✅ Added: {}", email);
                            }
                            Err(e) => {
                                error_count += 1;
                                info!("❌ Failed to add {}: {}", email, e);
                            }
                        }
                    }
                    Err(e) => {
                        error_count += 1;
                        info!("❌ CSV parsing error: {}", e);
                    }
                }
            }

            info!("Import completed:");
            info!("  ✅ Success: {}", success_count);
            info!("  ❌ Errors:  {}", error_count);
        }

        AdminCommand::Init => {
            info!(
                "✅ Database initialized at: {}",
                cli.database_path.display()
            );
            info!("   Tables created: profiles");
            info!("");
            info!("Usage:");
            info!("  resumate-admin add <email>        # Pre-register a profile");
            info!("  resumate-admin check <email>      # Check registration");
            info!("  resumate-admin list               # List active profiles");
        }
    }

    Ok(())
}
