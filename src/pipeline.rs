//! The banner pipeline, run inline inside every record save.
//!
//! A save reads the staged upload, derives the fixed WebP variants, writes
//! them, swaps the record's image fields to the new artifacts, best-effort
//! deletes the artifacts they replace, and only then persists the record,
//! exactly once. Fatal image or storage errors abort before persistence;
//! artifacts already written in the same run are not rolled back.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::codec;
use crate::error::SaveError;
use crate::image_ref::ImageRef;
use crate::naming::artifact_path;
use crate::records::{Article, Category};
use crate::storage::StorageBackend;
use crate::store::RecordStore;
use crate::variants::{self, VariantSpec, ARTICLE_VARIANTS, CATEGORY_VARIANTS};

/// New refs produced by one pipeline run plus the stale refs it obsoletes.
/// The caller applies it to the record in one step.
#[derive(Debug)]
pub struct ArtifactPlan {
    produced: Vec<(&'static str, ImageRef)>,
    pub stale: Vec<ImageRef>,
}

impl ArtifactPlan {
    /// New ref for a variant suffix (`""` is the primary).
    pub fn produced(&self, suffix: &str) -> Option<&ImageRef> {
        self.produced
            .iter()
            .find(|(s, _)| *s == suffix)
            .map(|(_, r)| r)
    }
}

/// Source path to process, when the decision rule says the pipeline must
/// run: the current field holds a stored upload differing from the
/// last-persisted value. Placeholders, empty fields, and unchanged refs
/// all yield `None`. An absent snapshot is the new-record case.
fn processing_source<'a>(
    previous: Option<&ImageRef>,
    current: Option<&'a ImageRef>,
) -> Option<&'a str> {
    let path = current?.path()?;
    if previous == current {
        return None;
    }
    Some(path)
}

/// Read the staged upload, derive every variant, and write the artifacts.
///
/// `previous_fields` are the image fields of the last-persisted snapshot;
/// those that are stored and not referenced by the new values come back in
/// `stale`, eligible for reclamation once the caller is done.
pub async fn compute_artifacts<S: StorageBackend>(
    source_path: &str,
    previous_fields: &[Option<&ImageRef>],
    specs: &[VariantSpec],
    storage: &S,
) -> Result<ArtifactPlan, SaveError> {
    let bytes = storage.read(source_path).await?;
    let decoded = codec::decode(&bytes)?;
    let rendered = variants::render_variants(&decoded, specs)?;

    let mut produced = Vec::with_capacity(rendered.len());
    for variant in rendered {
        let path = artifact_path(source_path, variant.suffix);
        let written = storage.write(&path, &variant.bytes).await?;
        info!(
            path = %written,
            width = variant.width,
            height = variant.height,
            "banner variant written"
        );
        produced.push((variant.suffix, ImageRef::stored(written)));
    }

    let stale = previous_fields
        .iter()
        .flatten()
        .copied()
        .filter(|old| old.is_stored())
        .filter(|old| !produced.iter().any(|(_, new)| new == *old))
        .cloned()
        .collect();

    Ok(ArtifactPlan { produced, stale })
}

/// Best-effort removal of artifacts orphaned by this save. Runs only after
/// the replacement artifacts exist; failures are logged, never propagated.
async fn reconcile<S: StorageBackend>(stale: &[ImageRef], storage: &S) {
    for old in stale {
        let Some(path) = old.path() else { continue };
        match storage.delete(path).await {
            Ok(()) => info!(path, "stale banner artifact removed"),
            Err(e) => warn!(path, error = %e, "failed to remove stale banner artifact"),
        }
    }
}

/// Save a category against an explicit last-persisted snapshot (`None` for
/// a new record). Persistence is invoked exactly once, after any image
/// work and reclamation.
pub async fn save_category_with_snapshot<S, R>(
    category: &mut Category,
    previous: Option<&Category>,
    storage: &S,
    store: &R,
) -> Result<Uuid, SaveError>
where
    S: StorageBackend,
    R: RecordStore<Category>,
{
    let prev_banner = previous.map(|p| &p.banner);
    let source = processing_source(prev_banner, Some(&category.banner)).map(str::to_owned);
    if let Some(source) = source {
        let plan = compute_artifacts(&source, &[prev_banner], CATEGORY_VARIANTS, storage).await?;
        if let Some(primary) = plan.produced("") {
            category.banner = primary.clone();
        }
        reconcile(&plan.stale, storage).await;
    } else {
        debug!(category = %category.id, "banner unchanged, pipeline skipped");
    }
    Ok(store.persist(category).await?)
}

/// Save an article against an explicit last-persisted snapshot. On a run,
/// the primary and both derived fields are replaced together, keeping them
/// consistent with the banner that produced them.
pub async fn save_article_with_snapshot<S, R>(
    article: &mut Article,
    previous: Option<&Article>,
    storage: &S,
    store: &R,
) -> Result<Uuid, SaveError>
where
    S: StorageBackend,
    R: RecordStore<Article>,
{
    let prev_banner = previous.and_then(|p| p.banner.as_ref());
    let source = processing_source(prev_banner, article.banner.as_ref()).map(str::to_owned);
    if let Some(source) = source {
        let previous_fields = [
            prev_banner,
            previous.and_then(|p| p.banner_medium.as_ref()),
            previous.and_then(|p| p.banner_small.as_ref()),
        ];
        let plan = compute_artifacts(&source, &previous_fields, ARTICLE_VARIANTS, storage).await?;
        article.banner = plan.produced("").cloned();
        article.banner_medium = plan.produced("medium").cloned();
        article.banner_small = plan.produced("small").cloned();
        reconcile(&plan.stale, storage).await;
    } else {
        debug!(article = %article.id, "banner unchanged, pipeline skipped");
    }
    Ok(store.persist(article).await?)
}

/// Save via a fresh lookup of the last-persisted snapshot; a missing row
/// is the new-record path, not an error.
pub async fn save_category<S, R>(
    category: &mut Category,
    storage: &S,
    store: &R,
) -> Result<Uuid, SaveError>
where
    S: StorageBackend,
    R: RecordStore<Category>,
{
    let previous = store.find_by_id(category.id).await?;
    save_category_with_snapshot(category, previous.as_ref(), storage, store).await
}

pub async fn save_article<S, R>(
    article: &mut Article,
    storage: &S,
    store: &R,
) -> Result<Uuid, SaveError>
where
    S: StorageBackend,
    R: RecordStore<Article>,
{
    let previous = store.find_by_id(article.id).await?;
    save_article_with_snapshot(article, previous.as_ref(), storage, store).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_default_never_triggers() {
        let placeholder = ImageRef::placeholder("https://placehold.co/614x256");
        assert_eq!(processing_source(None, Some(&placeholder)), None);
        // Even a changed placeholder is not a stored upload.
        let other = ImageRef::placeholder("https://placehold.co/other");
        assert_eq!(processing_source(Some(&placeholder), Some(&other)), None);
    }

    #[test]
    fn new_record_with_stored_upload_triggers() {
        let upload = ImageRef::stored("noticias/banners/a.jpg");
        assert_eq!(
            processing_source(None, Some(&upload)),
            Some("noticias/banners/a.jpg")
        );
    }

    #[test]
    fn unchanged_stored_ref_skips() {
        let upload = ImageRef::stored("noticias/banners/a.webp");
        assert_eq!(processing_source(Some(&upload), Some(&upload)), None);
    }

    #[test]
    fn changed_stored_ref_triggers() {
        let old = ImageRef::stored("noticias/banners/a.webp");
        let new = ImageRef::stored("noticias/banners/b.png");
        assert_eq!(
            processing_source(Some(&old), Some(&new)),
            Some("noticias/banners/b.png")
        );
    }

    #[test]
    fn absent_field_skips() {
        assert_eq!(processing_source(None, None), None);
        let old = ImageRef::stored("noticias/banners/a.webp");
        assert_eq!(processing_source(Some(&old), None), None);
    }
}
