//! Content backend for a news site: category and article records, a
//! path-addressed storage seam, and the banner image pipeline that runs
//! inside every save.
//!
//! Saves are the only trigger. When a save carries a new stored upload,
//! the pipeline decodes it once, derives the fixed WebP variants, swaps
//! the record's image fields to the new artifacts, best-effort deletes the
//! artifacts they replace, and then persists the record exactly once.
//! Placeholder defaults are never processed and never deleted.

pub mod codec;
pub mod error;
pub mod geometry;
pub mod image_ref;
pub mod mock;
pub mod naming;
pub mod pipeline;
pub mod records;
pub mod storage;
pub mod store;
pub mod variants;

pub use error::{ImageError, SaveError, StorageError, StoreError};
pub use image_ref::ImageRef;
pub use pipeline::{
    compute_artifacts, save_article, save_article_with_snapshot, save_category,
    save_category_with_snapshot, ArtifactPlan,
};
pub use records::{Article, Category, Identifiable, CATEGORY_BANNER_PLACEHOLDER};
pub use storage::{FsStorage, StorageBackend};
pub use store::{MemoryStore, RecordStore};
