// src/core/database.rs
//! Database operations for the `profiles` table

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub pool: Option<SqlitePool>,
}

impl DatabaseConfig {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            database_path,
            pool: None,
        }
    }

    /// Initialize the database connection pool
    pub async fn init_pool(&mut self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create database directory")?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", self.database_path.display());

        let pool = SqlitePool::connect(&database_url)
            .await
            .context("Failed to connect to SQLite database")?;
        self.pool = Some(pool);

        info!("Database connection pool initialized: {}", database_url);
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> Result<&SqlitePool> {
        self.pool.as_ref().ok_or_else(|| {
            anyhow::anyhow!("Database pool not initialized. Call init_pool() first.")
        })
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool()?;

        sqlx::query(
            r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL,
            display_name TEXT,
            phone TEXT,
            location TEXT,
            headline TEXT,
            skills TEXT NOT NULL DEFAULT '[]',
            linkedin_url TEXT,
            github_url TEXT,
            website_url TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        );
        "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_subject ON profiles(subject);")
            .execute(pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_profiles_email ON profiles(email);")
            .execute(pool)
            .await?;

        info!("Database migrations completed");
        Ok(())
    }
}

// ===== Profile Model =====

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub skills: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Profile {
    /// Skills column holds a JSON array; unreadable content reads as empty
    pub fn skills_list(&self) -> Vec<String> {
        serde_json::from_str(&self.skills).unwrap_or_default()
    }
}

/// Mutable profile fields accepted from the profile page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub website_url: Option<String>,
}

// ===== Profile Repository =====

pub struct ProfileRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_subject(&self, subject: &str) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, subject, email, display_name, phone, location, headline, skills,
                   linkedin_url, github_url, website_url, created_at, updated_at, is_active
            FROM profiles
            WHERE is_active = TRUE AND subject = ?
            LIMIT 1
            "#,
        )
        .bind(subject)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, subject, email, display_name, phone, location, headline, skills,
                   linkedin_url, github_url, website_url, created_at, updated_at, is_active
            FROM profiles
            WHERE is_active = TRUE AND email = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn create(
        &self,
        subject: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<Profile> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO profiles (subject, email, display_name, skills, created_at, updated_at, is_active)
            VALUES (?, ?, ?, '[]', ?, ?, TRUE)
            "#,
        )
        .bind(subject)
        .bind(email)
        .bind(display_name)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let profile_id = result.last_insert_rowid();

        let profile = Profile {
            id: profile_id,
            subject: subject.to_string(),
            email: email.to_string(),
            display_name: display_name.map(|s| s.to_string()),
            phone: None,
            location: None,
            headline: None,
            skills: "[]".to_string(),
            linkedin_url: None,
            github_url: None,
            website_url: None,
            created_at: now,
            updated_at: now,
            is_active: true,
        };

        info!("Created profile for {} (subject: {})", email, subject);
        Ok(profile)
    }

    /// Attach an identity-provider subject to a pre-registered profile row
    pub async fn claim_subject(&self, email: &str, subject: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET subject = ?, updated_at = ?
            WHERE email = ? AND is_active = TRUE
            "#,
        )
        .bind(subject)
        .bind(Utc::now())
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update(&self, subject: &str, update: &ProfileUpdate) -> Result<bool> {
        let skills_json =
            serde_json::to_string(&update.skills).context("Failed to serialize skills")?;

        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET display_name = ?, phone = ?, location = ?, headline = ?, skills = ?,
                linkedin_url = ?, github_url = ?, website_url = ?, updated_at = ?
            WHERE subject = ? AND is_active = TRUE
            "#,
        )
        .bind(&update.display_name)
        .bind(&update.phone)
        .bind(&update.location)
        .bind(&update.headline)
        .bind(skills_json)
        .bind(&update.linkedin_url)
        .bind(&update.github_url)
        .bind(&update.website_url)
        .bind(Utc::now())
        .bind(subject)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn list_active(&self) -> Result<Vec<Profile>> {
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, subject, email, display_name, phone, location, headline, skills,
                   linkedin_url, github_url, website_url, created_at, updated_at, is_active
            FROM profiles
            WHERE is_active = TRUE
            ORDER BY email ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(profiles)
    }

    pub async fn deactivate_by_email(&self, email: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET is_active = FALSE, updated_at = ?
            WHERE email = ?
            "#,
        )
        .bind(Utc::now())
        .bind(email)
        .execute(self.pool)
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Deactivated profile for email: {}", email);
        }

        Ok(updated)
    }
}

// ===== Profile Service =====

pub struct ProfileService<'a> {
    repo: ProfileRepository<'a>,
}

impl<'a> ProfileService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: ProfileRepository::new(pool),
        }
    }

    /// Get the profile for an authenticated user, creating it on first login.
    /// A pre-registered row (admin CLI) with a matching email is claimed
    /// instead of duplicated.
    pub async fn get_or_create(
        &self,
        subject: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<Profile> {
        if let Some(profile) = self.repo.find_by_subject(subject).await? {
            return Ok(profile);
        }

        if self.repo.find_by_email(email).await?.is_some() {
            self.repo.claim_subject(email, subject).await?;
            if let Some(profile) = self.repo.find_by_subject(subject).await? {
                info!("Claimed pre-registered profile for {}", email);
                return Ok(profile);
            }
        }

        info!("First login for {}, creating profile", email);
        self.repo.create(subject, email, display_name).await
    }

    pub async fn update_profile(&self, subject: &str, update: &ProfileUpdate) -> Result<bool> {
        self.repo.update(subject, update).await
    }
}

// ===== Store path helpers =====

pub fn email_to_folder_name(email: &str) -> String {
    email.replace('@', "-").replace('.', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_to_folder_name() {
        assert_eq!(
            email_to_folder_name("user@example.com"),
            "user-example-com"
        );
    }

    #[test]
    fn test_skills_list_tolerates_bad_json() {
        let mut profile = Profile {
            id: 1,
            subject: "s".into(),
            email: "e@x.io".into(),
            display_name: None,
            phone: None,
            location: None,
            headline: None,
            skills: r#"["rust","sql"]"#.into(),
            linkedin_url: None,
            github_url: None,
            website_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            is_active: true,
        };
        assert_eq!(profile.skills_list(), vec!["rust", "sql"]);

        profile.skills = "not json".into();
        assert!(profile.skills_list().is_empty());
    }
}
