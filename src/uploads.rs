use std::path::Path;

use tracing::debug;

use crate::imaging;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const MAX_PHOTOS: usize = 3;

/// One photo field pulled out of the multipart body, not yet validated.
pub struct RawPhoto {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("At most {MAX_PHOTOS} photos can be attached ({0} were submitted)")]
    TooManyPhotos(usize),
    #[error("Unsupported photo type: {0}")]
    BadExtension(String),
    #[error("Failed to save photo")]
    Io(#[from] std::io::Error),
}

/// Naming scheme for stored files. Both are collision-resistant so
/// concurrent submissions never clobber each other; which one a report
/// kind uses is a historical accident kept for compatibility with files
/// already on disk.
#[derive(Clone, Copy, Debug)]
pub enum NameScheme {
    /// `YYYYMMDDHHMMSS_xxxxxxxx.ext` — lost reports.
    Timestamped,
    /// 32 hex chars + extension — found reports.
    Random,
}

pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Photo-count cap and per-file extension allow-list. Any failure rejects
/// the whole submission; nothing is written.
pub fn check_photos(photos: &[RawPhoto]) -> Result<(), UploadError> {
    if photos.len() > MAX_PHOTOS {
        return Err(UploadError::TooManyPhotos(photos.len()));
    }
    for photo in photos {
        match extension_of(&photo.filename) {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
            Some(ext) => return Err(UploadError::BadExtension(ext)),
            None => return Err(UploadError::BadExtension("(no extension)".to_string())),
        }
    }
    Ok(())
}

pub fn generate_name(scheme: NameScheme, ext: &str) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    match scheme {
        NameScheme::Timestamped => {
            let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
            format!("{}_{}.{}", stamp, &random[..8], ext)
        }
        NameScheme::Random => format!("{}.{}", random, ext),
    }
}

/// Writes each photo into the upload directory under a generated name and
/// normalizes it in place. Returns the stored filenames in submission
/// order. Callers run [`check_photos`] first; an unexpected missing
/// extension here falls back to the literal `bin`.
pub fn save_photos(
    upload_dir: &Path,
    photos: Vec<RawPhoto>,
    scheme: NameScheme,
) -> Result<Vec<String>, UploadError> {
    std::fs::create_dir_all(upload_dir)?;

    let mut stored = Vec::with_capacity(photos.len());
    for photo in photos {
        let ext = extension_of(&photo.filename).unwrap_or_else(|| "bin".to_string());
        let name = generate_name(scheme, &ext);
        let path = upload_dir.join(&name);
        std::fs::write(&path, &photo.bytes)?;
        debug!(
            "saved photo {} ({}, {} bytes)",
            name,
            mime_guess::from_path(&path).first_or_octet_stream(),
            photo.bytes.len()
        );
        imaging::normalize(&path, imaging::MAX_WIDTH, imaging::JPEG_QUALITY);
        stored.push(name);
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(name: &str) -> RawPhoto {
        RawPhoto {
            filename: name.to_string(),
            bytes: vec![0u8; 4],
        }
    }

    #[test]
    fn timestamped_names_have_stamp_and_suffix() {
        let name = generate_name(NameScheme::Timestamped, "jpg");
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(ext, "jpg");
        let (stamp, suffix) = stem.split_once('_').unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn random_names_are_32_hex_chars() {
        let name = generate_name(NameScheme::Random, "png");
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(ext, "png");
        assert_eq!(stem.len(), 32);
        assert!(stem.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn successive_names_differ() {
        assert_ne!(
            generate_name(NameScheme::Timestamped, "gif"),
            generate_name(NameScheme::Timestamped, "gif")
        );
        assert_ne!(
            generate_name(NameScheme::Random, "gif"),
            generate_name(NameScheme::Random, "gif")
        );
    }

    #[test]
    fn four_photos_are_rejected() {
        let photos: Vec<_> = (0..4).map(|i| photo(&format!("p{i}.png"))).collect();
        match check_photos(&photos) {
            Err(UploadError::TooManyPhotos(4)) => {}
            other => panic!("expected TooManyPhotos, got {other:?}"),
        }
    }

    #[test]
    fn disallowed_extension_is_named_in_the_error() {
        let photos = vec![photo("ok.jpg"), photo("nope.bmp")];
        match check_photos(&photos) {
            Err(UploadError::BadExtension(ext)) => assert_eq!(ext, "bmp"),
            other => panic!("expected BadExtension, got {other:?}"),
        }
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(check_photos(&[photo("CAT.JPG"), photo("dog.Png")]).is_ok());
    }

    #[test]
    fn empty_photo_list_is_fine() {
        assert!(check_photos(&[]).is_ok());
    }

    #[test]
    fn save_writes_normalizes_and_returns_names_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut png_bytes = Vec::new();
        image::RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3]))
            .write_to(
                &mut std::io::Cursor::new(&mut png_bytes),
                image::ImageFormat::Png,
            )
            .unwrap();

        let photos = vec![
            RawPhoto {
                filename: "a.png".to_string(),
                bytes: png_bytes.clone(),
            },
            RawPhoto {
                filename: "b.png".to_string(),
                bytes: png_bytes,
            },
        ];
        let stored = save_photos(dir.path(), photos, NameScheme::Random).unwrap();
        assert_eq!(stored.len(), 2);
        for name in &stored {
            assert!(dir.path().join(name).exists());
        }
    }
}
