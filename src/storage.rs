use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::StorageError;

/// Path-addressed byte storage. Paths are relative and `/`-separated; no
/// transactional guarantees, overwrites are last-writer-wins.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;
    /// Returns the path the bytes landed at.
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError>;
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Filesystem storage rooted at a media directory.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Relative paths only; anything with `..` or a root component is
    /// rejected rather than resolved outside the media root.
    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(path);
        if path.is_empty() || rel.components().any(|c| !matches!(c, Component::Normal(_))) {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl StorageBackend for FsStorage {
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let abs = self.resolve(path)?;
        match fs::read(&abs).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let abs = self.resolve(path)?;
        let io_err = |e: std::io::Error| StorageError::Io {
            path: path.to_string(),
            source: e,
        };
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        // Write a sibling tmp file, then rename into place.
        let tmp = self.root.join(format!("{path}.tmp"));
        {
            let mut f = fs::File::create(&tmp).await.map_err(io_err)?;
            f.write_all(bytes).await.map_err(io_err)?;
            let _ = f.sync_all().await; // best-effort
        }
        fs::rename(&tmp, &abs).await.map_err(io_err)?;
        Ok(path.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let abs = self.resolve(path)?;
        match fs::remove_file(&abs).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io {
                path: path.to_string(),
                source: e,
            }),
        }
    }
}
