// src/core/store.rs
//! File-backed document store, one folder per user.
//!
//! Keys mirror the storage layout the frontend relies on: `resume_<id>`,
//! the `user_resumes` index, `latest_analysis` and `chat_history`. Each key
//! is a JSON blob; saves are plain read-then-write with last write winning.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::AnalysisResult;
use crate::core::FsOps;
use crate::editor::Resume;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn user_dir(&self, user_key: &str) -> PathBuf {
        self.root.join(user_key)
    }

    fn resume_path(&self, user_key: &str, resume_id: &str) -> PathBuf {
        self.user_dir(user_key)
            .join(format!("resume_{}.json", resume_id))
    }

    fn index_path(&self, user_key: &str) -> PathBuf {
        self.user_dir(user_key).join("user_resumes.json")
    }

    fn analysis_path(&self, user_key: &str) -> PathBuf {
        self.user_dir(user_key).join("latest_analysis.json")
    }

    fn chat_path(&self, user_key: &str) -> PathBuf {
        self.user_dir(user_key).join("chat_history.json")
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = FsOps::read_file_safe(path).await?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt JSON document: {}", path.display()))?;
        Ok(Some(value))
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string(value).context("Failed to serialize document")?;
        FsOps::write_file_safe(path, &content).await
    }

    // ===== Resumes =====

    /// Persist a resume and register its id in the user's index. Saving the
    /// same id again overwrites the blob; the index keeps one entry per id.
    pub async fn save_resume(&self, user_key: &str, resume: &Resume) -> Result<()> {
        Self::write_json(&self.resume_path(user_key, &resume.id), resume).await?;

        let mut index = self.resume_index(user_key).await?;
        if !index.contains(&resume.id) {
            index.push(resume.id.clone());
            Self::write_json(&self.index_path(user_key), &index).await?;
        }

        Ok(())
    }

    pub async fn load_resume(&self, user_key: &str, resume_id: &str) -> Result<Option<Resume>> {
        Self::read_json(&self.resume_path(user_key, resume_id)).await
    }

    pub async fn delete_resume(&self, user_key: &str, resume_id: &str) -> Result<bool> {
        let removed = FsOps::remove_file_safe(&self.resume_path(user_key, resume_id)).await?;

        let mut index = self.resume_index(user_key).await?;
        let before = index.len();
        index.retain(|id| id != resume_id);
        if index.len() != before {
            Self::write_json(&self.index_path(user_key), &index).await?;
        }

        Ok(removed)
    }

    pub async fn resume_index(&self, user_key: &str) -> Result<Vec<String>> {
        Ok(Self::read_json(&self.index_path(user_key))
            .await?
            .unwrap_or_default())
    }

    /// Load every resume listed in the index; ids whose blob is missing are
    /// skipped rather than failing the whole listing.
    pub async fn list_resumes(&self, user_key: &str) -> Result<Vec<Resume>> {
        let mut resumes = Vec::new();
        for id in self.resume_index(user_key).await? {
            if let Some(resume) = self.load_resume(user_key, &id).await? {
                resumes.push(resume);
            }
        }
        Ok(resumes)
    }

    // ===== Latest analysis =====

    pub async fn save_latest_analysis(
        &self,
        user_key: &str,
        analysis: &AnalysisResult,
    ) -> Result<()> {
        Self::write_json(&self.analysis_path(user_key), analysis).await
    }

    pub async fn load_latest_analysis(&self, user_key: &str) -> Result<Option<AnalysisResult>> {
        Self::read_json(&self.analysis_path(user_key)).await
    }

    // ===== Chat history =====

    pub async fn append_chat_messages(
        &self,
        user_key: &str,
        messages: &[ChatMessage],
    ) -> Result<()> {
        let mut history = self.chat_history(user_key).await?;
        history.extend_from_slice(messages);
        Self::write_json(&self.chat_path(user_key), &history).await
    }

    pub async fn chat_history(&self, user_key: &str) -> Result<Vec<ChatMessage>> {
        Ok(Self::read_json(&self.chat_path(user_key))
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Resume;

    fn store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (_dir, store) = store();
        let resume = Resume::new("Backend CV", "modern");

        store.save_resume("u1", &resume).await.expect("save");
        let loaded = store
            .load_resume("u1", &resume.id)
            .await
            .expect("load")
            .expect("present");

        assert_eq!(loaded.id, resume.id);
        assert_eq!(loaded.title, "Backend CV");
    }

    #[tokio::test]
    async fn saving_same_id_twice_overwrites_and_keeps_one_index_entry() {
        let (_dir, store) = store();
        let mut resume = Resume::new("First title", "modern");

        store.save_resume("u1", &resume).await.expect("save 1");
        resume.title = "Second title".to_string();
        store.save_resume("u1", &resume).await.expect("save 2");
        store.save_resume("u1", &resume).await.expect("save 3");

        let index = store.resume_index("u1").await.expect("index");
        assert_eq!(index, vec![resume.id.clone()]);

        let loaded = store
            .load_resume("u1", &resume.id)
            .await
            .expect("load")
            .expect("present");
        assert_eq!(loaded.title, "Second title");
    }

    #[tokio::test]
    async fn index_holds_one_entry_per_unique_id() {
        let (_dir, store) = store();
        let a = Resume::new("A", "modern");
        let b = Resume::new("B", "classic");

        for _ in 0..3 {
            store.save_resume("u1", &a).await.expect("save a");
        }
        store.save_resume("u1", &b).await.expect("save b");

        let mut index = store.resume_index("u1").await.expect("index");
        index.sort();
        let mut expected = vec![a.id.clone(), b.id.clone()];
        expected.sort();
        assert_eq!(index, expected);
    }

    #[tokio::test]
    async fn delete_removes_blob_and_index_entry() {
        let (_dir, store) = store();
        let resume = Resume::new("Doomed", "minimal");

        store.save_resume("u1", &resume).await.expect("save");
        assert!(store.delete_resume("u1", &resume.id).await.expect("delete"));

        assert!(store
            .load_resume("u1", &resume.id)
            .await
            .expect("load")
            .is_none());
        assert!(store.resume_index("u1").await.expect("index").is_empty());

        // Second delete is a no-op
        assert!(!store.delete_resume("u1", &resume.id).await.expect("delete"));
    }

    #[tokio::test]
    async fn chat_history_appends_in_order() {
        let (_dir, store) = store();

        store
            .append_chat_messages(
                "u1",
                &[
                    ChatMessage::user("hello"),
                    ChatMessage::assistant("hi there"),
                ],
            )
            .await
            .expect("append");
        store
            .append_chat_messages("u1", &[ChatMessage::user("more")])
            .await
            .expect("append");

        let history = store.chat_history("u1").await.expect("history");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, "hello");
        assert_eq!(history[2].content, "more");
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let (_dir, store) = store();
        let resume = Resume::new("Mine", "modern");

        store.save_resume("alice", &resume).await.expect("save");
        assert!(store
            .load_resume("bob", &resume.id)
            .await
            .expect("load")
            .is_none());
        assert!(store.resume_index("bob").await.expect("index").is_empty());
    }
}
