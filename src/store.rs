//! Flat-directory document store
//!
//! Uploaded files live in one directory; the filename is the only
//! identifier. There is no metadata sidecar and no delete operation.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::{AppError, AppResult};

/// Handle to the upload directory. Injected into request handlers rather
/// than accessed as a global.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// List the names of stored documents, sorted. Regular files only; no
    /// subdirectory traversal and no extension filtering.
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Store an uploaded file under a timestamp-qualified name
    /// (`{stem}-{unix_millis}.{ext}`) and return the stored name.
    ///
    /// The timestamp keeps repeated uploads of the same file from clobbering
    /// each other while the original stem stays visible in listings.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> AppResult<String> {
        let original = Path::new(original_name);
        let stem = original
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("upload");
        let millis = chrono::Utc::now().timestamp_millis();
        let stored = match original.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}-{}.{}", stem, millis, ext),
            None => format!("{}-{}", stem, millis),
        };

        let path = self.root.join(&stored);
        tokio::fs::write(&path, data).await?;
        info!(name = %stored, bytes = data.len(), "stored document");
        Ok(stored)
    }

    /// Resolve a document name to its path inside the store.
    ///
    /// Names carrying path separators or parent components are rejected so a
    /// request cannot reach outside the upload directory.
    pub async fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::InvalidRequest(format!(
                "invalid document name: {name:?}"
            )));
        }
        let path = self.root.join(name);
        if !tokio::fs::try_exists(&path).await? {
            return Err(AppError::NotFound(format!("document '{name}'")));
        }
        Ok(path)
    }
}
