//! Upload directory management
//!
//! Persists uploaded photo bytes under a single upload directory and removes
//! them again when their owning record drops the reference. Stored names are
//! prefixed with the upload time in milliseconds, matching the public
//! `/uploads/<filename>` URLs served by the static file service.

use crate::core::error::{KicksError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Filesystem store for uploaded photos
#[derive(Clone, Debug)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create an upload store rooted at `root`, creating the directory if needed
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(KicksError::IoError)?;
        Ok(Self { root })
    }

    /// Root directory where uploads are stored
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist uploaded bytes and return the stored filename
    ///
    /// The stored name is `{unix_millis}-{original_name}` with the original
    /// name reduced to its final path component. Colliding timestamps plus
    /// identical names can overwrite; treated as negligible for this workload.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let safe_name = sanitize_filename(original_name);
        if safe_name.is_empty() {
            return Err(KicksError::ValidationError(
                "Uploaded file has no usable filename".to_string(),
            ));
        }

        let filename = format!("{}-{}", chrono::Utc::now().timestamp_millis(), safe_name);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data).await.map_err(KicksError::IoError)?;

        Ok(filename)
    }

    /// Delete a stored file by name
    ///
    /// A file that is already absent is a no-op success: the metadata update
    /// that triggered the removal has already happened, so only unexpected IO
    /// failures propagate.
    pub async fn remove(&self, filename: &str) -> Result<()> {
        let safe_name = sanitize_filename(filename);
        if safe_name.is_empty() {
            return Ok(());
        }

        let path = self.root.join(&safe_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(filename = %safe_name, "Upload file already absent, skipping delete");
                Ok(())
            }
            Err(e) => Err(KicksError::IoError(e)),
        }
    }

    /// Check whether a stored file exists
    pub fn exists(&self, filename: &str) -> bool {
        let safe_name = sanitize_filename(filename);
        !safe_name.is_empty() && self.root.join(safe_name).exists()
    }
}

/// Reduce a client-supplied filename to a bare file name
///
/// Strips any path components so a crafted name cannot escape the upload
/// directory.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (UploadStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = UploadStore::new(temp_dir.path().join("uploads")).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_save_prefixes_timestamp() {
        let (store, _temp_dir) = create_store();

        let filename = store.save("shoe.png", b"fake image bytes").await.unwrap();

        assert!(filename.ends_with("-shoe.png"));
        assert!(store.exists(&filename));

        let contents = tokio::fs::read(store.root().join(&filename)).await.unwrap();
        assert_eq!(contents, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_save_strips_path_components() {
        let (store, _temp_dir) = create_store();

        let filename = store.save("../../etc/passwd", b"nope").await.unwrap();

        assert!(filename.ends_with("-passwd"));
        assert!(!filename.contains(".."));
        assert!(store.root().join(&filename).exists());
    }

    #[tokio::test]
    async fn test_remove_existing_file() {
        let (store, _temp_dir) = create_store();

        let filename = store.save("shoe.png", b"bytes").await.unwrap();
        store.remove(&filename).await.unwrap();

        assert!(!store.exists(&filename));
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_noop() {
        let (store, _temp_dir) = create_store();

        // No such file: must succeed, not error
        assert!(store.remove("123-never-uploaded.png").await.is_ok());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("shoe.png"), "shoe.png");
        assert_eq!(sanitize_filename("a/b/shoe.png"), "shoe.png");
        assert_eq!(sanitize_filename("../shoe.png"), "shoe.png");
        assert_eq!(sanitize_filename(""), "");
    }
}
