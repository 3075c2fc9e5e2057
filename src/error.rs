use thiserror::Error;

/// Codec-level failures. Any of these aborts the save that triggered the
/// pipeline; the record is never persisted with half-processed fields.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("corrupt image data: {0}")]
    Corrupt(String),
    #[error("image encode failed: {0}")]
    Encode(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no stored file at {0}")]
    NotFound(String),
    #[error("storage i/o at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("path escapes storage root: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record serialization: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Everything a save operation can surface to its caller. Stale-artifact
/// delete failures are deliberately absent: those are logged and swallowed.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
