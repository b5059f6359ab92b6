use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use tracing::warn;

/// Photos wider than this are downscaled before they hit the listing page.
pub const MAX_WIDTH: u32 = 1024;
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, thiserror::Error)]
enum NormalizeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Normalizes an uploaded photo in place: odd pixel layouts are converted
/// to something encodable, oversized images are downscaled, and the file is
/// re-encoded over its own path.
///
/// Never fails past this boundary. The upload flow keeps the record either
/// way, so a decode or codec problem only costs the optimization.
pub fn normalize(path: &Path, max_width: u32, jpeg_quality: u8) {
    if let Err(e) = normalize_inner(path, max_width, jpeg_quality) {
        warn!("photo normalization skipped for {}: {}", path.display(), e);
    }
}

fn normalize_inner(path: &Path, max_width: u32, jpeg_quality: u8) -> Result<(), NormalizeError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = reader.format();
    let img = reader.decode()?;

    // Pixel-layout fixups. Luma-alpha has no JPEG/GIF encoding, and
    // 16-bit/float layouts only round-trip through PNG.
    let (img, force_png) = match img.color() {
        ColorType::L8 | ColorType::Rgb8 | ColorType::Rgba8 => (img, false),
        ColorType::La8 | ColorType::La16 => (DynamicImage::ImageRgba8(img.to_rgba8()), false),
        _ => (DynamicImage::ImageRgba8(img.to_rgba8()), true),
    };

    let (width, height) = img.dimensions();
    let img = if width > max_width {
        let scaled_height =
            ((height as f64) * (max_width as f64) / (width as f64)).round() as u32;
        img.resize_exact(max_width, scaled_height.max(1), FilterType::Lanczos3)
    } else {
        img
    };

    let target = match format {
        Some(
            f @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Gif | ImageFormat::WebP),
        ) if !force_png => f,
        // Any other recognized format is kept as long as it can carry the
        // pixels; alpha-bearing images fall back to PNG.
        Some(f) if !force_png && !img.color().has_alpha() => f,
        _ => ImageFormat::Png,
    };

    let mut out = BufWriter::new(File::create(path)?);
    if target == ImageFormat::Jpeg {
        // JPEG has no alpha channel.
        let img = if img.color().has_alpha() {
            DynamicImage::ImageRgb8(img.to_rgb8())
        } else {
            img
        };
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut out, jpeg_quality))?;
    } else {
        img.write_to(&mut out, target)?;
    }
    Ok(())
}
