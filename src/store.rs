// src/store.rs

//! Persistence for the last observed fingerprint.
//!
//! Each checker owns one flat file holding exactly one value. The trait exists
//! so pipelines can run against an in-memory store in tests.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::fingerprint::Fingerprint;

/// One-value persistence between runs.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the previously stored fingerprint. Absence (first run) is `None`,
    /// not an error.
    async fn load(&self) -> Result<Option<Fingerprint>>;

    /// Overwrite the stored value with exactly this fingerprint.
    async fn store(&self, fingerprint: &Fingerprint) -> Result<()>;
}

/// Flat-file store: the file contains the fingerprint and nothing else.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateStore for FileStore {
    async fn load(&self) -> Result<Option<Fingerprint>> {
        match tokio::fs::read_to_string(&self.path).await {
            // Trim only surrounding whitespace (trailing newline from manual
            // edits); the value itself round-trips untouched.
            Ok(contents) => Ok(Some(Fingerprint::new(contents.trim()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn store(&self, fingerprint: &Fingerprint) -> Result<()> {
        tokio::fs::write(&self.path, fingerprint.as_str()).await?;
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    value: Mutex<Option<Fingerprint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(fingerprint: Fingerprint) -> Self {
        Self {
            value: Mutex::new(Some(fingerprint)),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<Option<Fingerprint>> {
        Ok(self.value.lock().unwrap().clone())
    }

    async fn store(&self, fingerprint: &Fingerprint) -> Result<()> {
        *self.value.lock().unwrap() = Some(fingerprint.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("last_version.txt"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn round_trips_exact_value() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("last_hash.txt"));

        let signature = Fingerprint::new("Mon, 01 Jan 2024 00:00:00 GMT|\"abc123\"|4096");
        store.store(&signature).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(signature.clone()));

        // File holds exactly the value, no trailing structure.
        let raw = std::fs::read_to_string(tmp.path().join("last_hash.txt")).unwrap();
        assert_eq!(raw, signature.as_str());
    }

    #[tokio::test]
    async fn store_overwrites_previous_value() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("state.txt"));

        store.store(&Fingerprint::new("16 Dec 2025")).await.unwrap();
        store.store(&Fingerprint::new("17 Dec 2025")).await.unwrap();
        assert_eq!(
            store.load().await.unwrap(),
            Some(Fingerprint::new("17 Dec 2025"))
        );
    }

    #[tokio::test]
    async fn load_trims_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.txt");
        std::fs::write(&path, "16 Dec 2025\n").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(
            store.load().await.unwrap(),
            Some(Fingerprint::new("16 Dec 2025"))
        );
    }

    #[tokio::test]
    async fn memory_store_matches_file_store_contract() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.store(&Fingerprint::new("xyz")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(Fingerprint::new("xyz")));
    }
}
