//! Local file system storage for uploads
//!
//! Files are written under the configured upload directory with generated
//! names; the original filename only contributes a sanitized extension.

use crate::config::StorageConfig;
use crate::utils::error::{ApiError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use uuid::Uuid;

/// A stored upload
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredFile {
    /// Path relative to the upload directory
    pub stored_path: String,
    /// MIME type detected from the original filename
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
}

/// Local file storage
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
    max_bytes: usize,
}

impl FileStorage {
    /// Create a new file storage instance
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        let path = PathBuf::from(&config.upload_dir);

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                ApiError::file_storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        info!("Local file storage initialized at: {}", path.display());
        Ok(Self {
            base_path: path,
            max_bytes: config.max_upload_bytes,
        })
    }

    /// Store an upload under a generated name
    pub async fn store(&self, filename: &str, content: &[u8]) -> Result<StoredFile> {
        if content.is_empty() {
            return Err(ApiError::validation("Uploaded file is empty"));
        }
        if content.len() > self.max_bytes {
            return Err(ApiError::validation(format!(
                "Uploaded file exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let file_id = Uuid::new_v4().to_string();
        let stored_name = match Self::sanitized_extension(filename) {
            Some(ext) => format!("{}.{}", file_id, ext),
            None => file_id.clone(),
        };
        let file_path = self.file_path(&stored_name);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ApiError::file_storage(format!("Failed to create directory: {}", e))
            })?;
        }

        let mut file = fs::File::create(&file_path)
            .await
            .map_err(|e| ApiError::file_storage(format!("Failed to create file: {}", e)))?;
        file.write_all(content)
            .await
            .map_err(|e| ApiError::file_storage(format!("Failed to write file: {}", e)))?;

        debug!("File stored: {} -> {}", filename, stored_name);
        Ok(StoredFile {
            stored_path: self.relative_path(&stored_name),
            content_type: Self::detect_content_type(filename),
            size: content.len() as u64,
        })
    }

    /// Read a stored file
    pub async fn get(&self, stored_path: &str) -> Result<Vec<u8>> {
        let file_path = self.base_path.join(stored_path);

        if !file_path.exists() {
            return Err(ApiError::MediaNotFound);
        }

        let content = fs::read(&file_path)
            .await
            .map_err(|e| ApiError::file_storage(format!("Failed to read file: {}", e)))?;
        Ok(content)
    }

    /// Delete a stored file
    pub async fn delete(&self, stored_path: &str) -> Result<()> {
        let file_path = self.base_path.join(stored_path);

        if file_path.exists() {
            fs::remove_file(&file_path)
                .await
                .map_err(|e| ApiError::file_storage(format!("Failed to delete file: {}", e)))?;
        }

        debug!("File deleted: {}", stored_path);
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        if !self.base_path.exists() {
            return Err(ApiError::file_storage("Storage directory does not exist"));
        }

        let test_file = self.base_path.join(".health_check");
        fs::write(&test_file, b"health_check")
            .await
            .map_err(|e| ApiError::file_storage(format!("Storage not writable: {}", e)))?;
        let _ = fs::remove_file(&test_file).await;

        Ok(())
    }

    /// Absolute path for a stored name
    fn file_path(&self, stored_name: &str) -> PathBuf {
        self.base_path.join(self.relative_path(stored_name))
    }

    /// Shard by the first two characters of the generated name
    fn relative_path(&self, stored_name: &str) -> String {
        let subdir = &stored_name[..2.min(stored_name.len())];
        format!("{}/{}", subdir, stored_name)
    }

    /// The original filename's extension, kept only if it is plain
    /// alphanumeric
    fn sanitized_extension(filename: &str) -> Option<String> {
        let ext = Path::new(filename).extension()?.to_str()?;
        if !ext.is_empty()
            && ext.len() <= 10
            && ext.chars().all(|c| c.is_ascii_alphanumeric())
        {
            Some(ext.to_ascii_lowercase())
        } else {
            None
        }
    }

    /// Detect content type from filename
    pub(crate) fn detect_content_type(filename: &str) -> String {
        match Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("txt") => "text/plain".to_string(),
            Some("json") => "application/json".to_string(),
            Some("html") => "text/html".to_string(),
            Some("css") => "text/css".to_string(),
            Some("js") => "application/javascript".to_string(),
            Some("png") => "image/png".to_string(),
            Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
            Some("gif") => "image/gif".to_string(),
            Some("webp") => "image/webp".to_string(),
            Some("svg") => "image/svg+xml".to_string(),
            Some("pdf") => "application/pdf".to_string(),
            Some("zip") => "application/zip".to_string(),
            _ => "application/octet-stream".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> StorageConfig {
        StorageConfig {
            upload_dir: dir.to_string_lossy().to_string(),
            max_upload_bytes: 1024,
        }
    }

    #[tokio::test]
    async fn store_and_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let stored = storage.store("report.pdf", b"hello").await.unwrap();
        assert_eq!(stored.content_type, "application/pdf");
        assert_eq!(stored.size, 5);
        assert!(stored.stored_path.ends_with(".pdf"));

        let content = storage.get(&stored.stored_path).await.unwrap();
        assert_eq!(content, b"hello");
    }

    #[tokio::test]
    async fn rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let big = vec![0u8; 2048];
        let err = storage.store("big.bin", &big).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn rejects_empty_upload() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let err = storage.store("empty.txt", b"").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn drops_suspicious_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let stored = storage.store("../../etc/passwd%00.sh x", b"data").await.unwrap();
        // Generated name only; no path fragments from the original survive
        assert!(!stored.stored_path.contains(".."));

        let stored = storage.store("noext", b"data").await.unwrap();
        assert!(!stored.stored_path.contains('.'));
    }

    #[tokio::test]
    async fn get_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let err = storage.get("ab/missing").await.unwrap_err();
        assert!(matches!(err, ApiError::MediaNotFound));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(&test_config(dir.path())).await.unwrap();

        let stored = storage.store("a.txt", b"x").await.unwrap();
        storage.delete(&stored.stored_path).await.unwrap();
        storage.delete(&stored.stored_path).await.unwrap();
        assert!(matches!(
            storage.get(&stored.stored_path).await.unwrap_err(),
            ApiError::MediaNotFound
        ));
    }
}
