//! File storage abstraction for form assets.
//!
//! Forms may carry an avatar image at a well-known storage key. The core
//! only needs a presence check plus public URL composition; asset upload
//! and lifecycle management stay with the operator.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store a file under a key.
    async fn put(&self, key: &str, data: &[u8]) -> AppResult<()>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn put(&self, key: &str, data: &[u8]) -> AppResult<()> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(path.exists())
    }
}

/// Storage key for a form's avatar image.
#[must_use]
pub fn avatar_key(form_uuid: &str) -> String {
    format!("{form_uuid}/avatar.png")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_key() {
        assert_eq!(avatar_key("abc-123"), "abc-123/avatar.png");
    }

    #[test]
    fn test_public_url_trims_trailing_slash() {
        let storage = LocalStorage::new(PathBuf::from("/tmp"), "/assets/".to_string());
        assert_eq!(storage.public_url("f/avatar.png"), "/assets/f/avatar.png");
    }

    #[tokio::test]
    async fn test_put_exists_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_path_buf(), "/assets".to_string());

        let key = avatar_key("form-1");
        assert!(!storage.exists(&key).await.unwrap());

        storage.put(&key, b"png bytes").await.unwrap();
        assert!(storage.exists(&key).await.unwrap());

        storage.delete(&key).await.unwrap();
        assert!(!storage.exists(&key).await.unwrap());
    }
}
