use image::{DynamicImage, GenericImageView};

use crate::codec;
use crate::error::ImageError;
use crate::geometry::{self, ResizePolicy};

/// One named output derived from a source upload.
#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    /// Artifact name suffix; empty for the primary.
    pub suffix: &'static str,
    pub target: (u32, u32),
    pub policy: ResizePolicy,
    pub quality: u8,
}

/// Category banners fill a fixed slot on the section page, so they are
/// cropped to the slot exactly.
pub const CATEGORY_VARIANTS: &[VariantSpec] = &[VariantSpec {
    suffix: "",
    target: (614, 256),
    policy: ResizePolicy::ExactCropFit,
    quality: 85,
}];

/// Article banners keep their aspect; the two thumbnails feed listings.
pub const ARTICLE_VARIANTS: &[VariantSpec] = &[
    VariantSpec {
        suffix: "",
        target: (1920, 1080),
        policy: ResizePolicy::BoundedShrink,
        quality: 80,
    },
    VariantSpec {
        suffix: "medium",
        target: (800, 600),
        policy: ResizePolicy::BoundedShrink,
        quality: 75,
    },
    VariantSpec {
        suffix: "small",
        target: (300, 200),
        policy: ResizePolicy::BoundedShrink,
        quality: 70,
    },
];

pub struct EncodedVariant {
    pub suffix: &'static str,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Derive every variant from one decoded source image. The source is
/// decoded once by the caller; each variant only re-samples and re-encodes.
/// A failing variant aborts the whole generation.
pub fn render_variants(
    source: &DynamicImage,
    specs: &[VariantSpec],
) -> Result<Vec<EncodedVariant>, ImageError> {
    let mut out = Vec::with_capacity(specs.len());
    for spec in specs {
        let normalized = geometry::normalize(source, spec.target, spec.policy);
        let (width, height) = normalized.dimensions();
        let bytes = codec::encode_webp(&normalized, spec.quality)?;
        out.push(EncodedVariant {
            suffix: spec.suffix,
            bytes,
            width,
            height,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::ImageBuffer::from_pixel(
            w,
            h,
            image::Rgba([200, 100, 50, 255]),
        ))
    }

    #[test]
    fn article_table_yields_primary_and_two_thumbnails() {
        let rendered = render_variants(&solid(2400, 1600), ARTICLE_VARIANTS).unwrap();
        let suffixes: Vec<_> = rendered.iter().map(|v| v.suffix).collect();
        assert_eq!(suffixes, ["", "medium", "small"]);
        for (v, spec) in rendered.iter().zip(ARTICLE_VARIANTS) {
            assert!(v.width <= spec.target.0 && v.height <= spec.target.1);
            assert!(!v.bytes.is_empty());
        }
    }

    #[test]
    fn category_table_is_a_single_exact_crop() {
        let rendered = render_variants(&solid(1000, 1000), CATEGORY_VARIANTS).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!((rendered[0].width, rendered[0].height), (614, 256));
    }
}
