//! Decode/encode wrapper around the image codecs. Pure CPU work; callers
//! on a runtime thread should consider `spawn_blocking` for large uploads.

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use crate::error::ImageError;

/// Decode an uploaded blob, sniffing the container from its magic bytes.
///
/// Unrecognizable containers are [`ImageError::UnsupportedFormat`];
/// recognized containers with an undecodable payload are
/// [`ImageError::Corrupt`].
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ImageError::Corrupt(e.to_string()))?;
    if reader.format().is_none() {
        return Err(ImageError::UnsupportedFormat);
    }
    reader.decode().map_err(|e| ImageError::Corrupt(e.to_string()))
}

/// Encode to lossy WebP at `quality` (clamped to 100). Alpha rides the
/// RGBA path; fidelity is whatever the linked libwebp delivers.
pub fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    encoder
        .encode_simple(false, quality.min(100) as f32)
        .map(|mem| mem.to_vec())
        .map_err(|e| ImageError::Encode(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::ImageBuffer::from_fn(w, h, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 255])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn unknown_bytes_are_unsupported() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ImageError::UnsupportedFormat));
    }

    #[test]
    fn truncated_png_is_corrupt() {
        let bytes = png_bytes(32, 32);
        let err = decode(&bytes[..24]).unwrap_err();
        assert!(matches!(err, ImageError::Corrupt(_)));
    }

    #[test]
    fn webp_roundtrip_preserves_dimensions() {
        let img = decode(&png_bytes(120, 90)).unwrap();
        let encoded = encode_webp(&img, 80).unwrap();
        let back = decode(&encoded).unwrap();
        assert_eq!(back.dimensions(), (120, 90));
    }
}
