use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// How a variant reaches its target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Scale to cover the box, then center-crop: output is exactly the box.
    ExactCropFit,
    /// Downscale so the image fits inside the box; never upscales.
    BoundedShrink,
}

pub fn normalize(image: &DynamicImage, target: (u32, u32), policy: ResizePolicy) -> DynamicImage {
    match policy {
        ResizePolicy::ExactCropFit => exact_crop_fit(image, target),
        ResizePolicy::BoundedShrink => bounded_shrink(image, target),
    }
}

/// Uniform scale by `max(tw/w, th/h)` so both axes cover the box, then
/// center-crop the overflow. No distortion; output dimensions are exactly
/// `target`.
pub fn exact_crop_fit(image: &DynamicImage, target: (u32, u32)) -> DynamicImage {
    let (tw, th) = target;
    let (w, h) = image.dimensions();
    let scale = f64::max(tw as f64 / w as f64, th as f64 / h as f64);
    let sw = ((w as f64 * scale).round() as u32).max(tw);
    let sh = ((h as f64 * scale).round() as u32).max(th);
    let scaled = image.resize_exact(sw, sh, FilterType::Lanczos3);
    scaled.crop_imm((sw - tw) / 2, (sh - th) / 2, tw, th)
}

/// Downscale preserving aspect so the larger axis fits `target`. Identity
/// when the image already fits the box on both axes.
pub fn bounded_shrink(image: &DynamicImage, target: (u32, u32)) -> DynamicImage {
    let (tw, th) = target;
    let (w, h) = image.dimensions();
    if w <= tw && h <= th {
        return image.clone();
    }
    image.resize(tw, th, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(image::ImageBuffer::from_pixel(
            w,
            h,
            image::Rgba([10, 20, 30, 255]),
        ))
    }

    #[test]
    fn crop_fit_hits_the_box_exactly_for_any_aspect() {
        for (w, h) in [(1200, 800), (400, 900), (614, 256), (5000, 100)] {
            let out = exact_crop_fit(&solid(w, h), (614, 256));
            assert_eq!(out.dimensions(), (614, 256), "input {w}x{h}");
        }
    }

    #[test]
    fn shrink_preserves_aspect_within_rounding() {
        let out = bounded_shrink(&solid(3000, 2000), (1920, 1080));
        let (w, h) = out.dimensions();
        assert!(w <= 1920 && h <= 1080);
        let input_ratio = 3000.0 / 2000.0;
        let output_ratio = w as f64 / h as f64;
        assert!((input_ratio - output_ratio).abs() < 0.01);
    }

    #[test]
    fn shrink_never_upscales() {
        let out = bounded_shrink(&solid(100, 80), (300, 200));
        assert_eq!(out.dimensions(), (100, 80));
    }

    #[test]
    fn shrink_is_identity_at_the_box_boundary() {
        let out = bounded_shrink(&solid(1920, 1080), (1920, 1080));
        assert_eq!(out.dimensions(), (1920, 1080));
    }
}
