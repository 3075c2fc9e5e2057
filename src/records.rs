use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::image_ref::ImageRef;

/// Default category banner shown until an editor uploads a real one.
/// A bare remote URL, never a stored file.
pub const CATEGORY_BANNER_PLACEHOLDER: &str = "https://placehold.co/614x256";

/// Uuid identity, used to key records in a store and to look up the
/// last-persisted snapshot before a save.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub banner: ImageRef,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            slug: slug::slugify(&name),
            banner: ImageRef::placeholder(CATEGORY_BANNER_PLACEHOLDER),
            name,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Primary banner; empty until the editor supplies an upload.
    pub banner: Option<ImageRef>,
    /// Derived variants, written only by the save pipeline. Either both
    /// empty or both consistent with the banner that produced them.
    pub banner_medium: Option<ImageRef>,
    pub banner_small: Option<ImageRef>,
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            slug: slug::slugify(&title),
            banner: None,
            banner_medium: None,
            banner_small: None,
            published_at: Utc::now(),
            title,
        }
    }
}

impl Identifiable for Article {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_defaults_to_placeholder_banner() {
        let cat = Category::new("Política Nacional");
        assert_eq!(cat.slug, "politica-nacional");
        assert_eq!(cat.banner, ImageRef::placeholder(CATEGORY_BANNER_PLACEHOLDER));
    }

    #[test]
    fn new_article_has_no_banner_variants() {
        let art = Article::new("Gran noticia 2026");
        assert_eq!(art.slug, "gran-noticia-2026");
        assert!(art.banner.is_none());
        assert!(art.banner_medium.is_none());
        assert!(art.banner_small.is_none());
    }
}
