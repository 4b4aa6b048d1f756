// src/core/config_manager.rs
//! Unified configuration management - one place to load env-driven settings

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub store_path: PathBuf,
    pub database_path: PathBuf,
}

/// Upstream service endpoints and credentials. An empty completion key means
/// the AI adapter runs in fallback-only mode.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub completion_url: String,
    pub completion_key: String,
    pub completion_model: String,
    pub jobs_api_url: String,
    pub jobs_api_key: String,
    pub timeout_seconds: u64,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = Self::load_environment()?;
        let service = Self::load_service();

        Ok(Self {
            environment,
            service,
        })
    }

    /// Load environment configuration
    fn load_environment() -> Result<EnvironmentConfig> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading environment configuration for: {}", env);

        let base_dir = if env == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        Ok(EnvironmentConfig {
            store_path: base_dir.join("store"),
            database_path: base_dir.join("resumate.db"),
        })
    }

    /// Load service configuration
    fn load_service() -> ServiceConfig {
        let completion_url = std::env::var("COMPLETION_API_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let completion_key = std::env::var("COMPLETION_API_KEY").unwrap_or_default();
        let completion_model =
            std::env::var("COMPLETION_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let jobs_api_url = std::env::var("JOBS_API_URL")
            .unwrap_or_else(|_| "https://jsearch.p.rapidapi.com".to_string());
        let jobs_api_key = std::env::var("JOBS_API_KEY").unwrap_or_default();

        ServiceConfig {
            completion_url,
            completion_key,
            completion_model,
            jobs_api_url,
            jobs_api_key,
            timeout_seconds: 60,
        }
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.store_path).await?;

        if let Some(db_parent) = self.environment.database_path.parent() {
            FsOps::ensure_dir_exists(db_parent).await?;
        }

        Ok(())
    }
}
