use serde::{Deserialize, Serialize};

/// Value held by a record's image field.
///
/// `Placeholder` is the unset/default state: a bare URL with nothing behind
/// it in storage. `Stored` points at a real file reachable through a
/// [`StorageBackend`](crate::storage::StorageBackend). The pipeline only
/// ever processes or deletes `Stored` refs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Placeholder { url: String },
    Stored { path: String },
}

impl ImageRef {
    pub fn placeholder(url: impl Into<String>) -> Self {
        Self::Placeholder { url: url.into() }
    }

    pub fn stored(path: impl Into<String>) -> Self {
        Self::Stored { path: path.into() }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }

    /// Storage path for stored refs; placeholders have none.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Stored { path } => Some(path),
            Self::Placeholder { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_not_stored() {
        let banner = ImageRef::placeholder("https://placehold.co/614x256");
        assert!(!banner.is_stored());
        assert_eq!(banner.path(), None);
    }

    #[test]
    fn stored_exposes_its_path() {
        let banner = ImageRef::stored("noticias/banners/2026/08/05/a.webp");
        assert!(banner.is_stored());
        assert_eq!(banner.path(), Some("noticias/banners/2026/08/05/a.webp"));
    }
}
