//! Raster image validation by full decode

use image::{ImageError, ImageReader, Limits};
use std::path::Path;

use super::validator::{ValidationOutcome, Validator, ValidatorError};

/// Default decoder allocation cap per file, matching the `image` crate's own
pub const DEFAULT_IMAGE_MAX_ALLOC: u64 = 512 * 1024 * 1024;

/// Validator for JPEG and the other raster formats the `image` crate decodes.
///
/// The format is sniffed from the file's magic bytes first and falls back to
/// the extension, so a PNG saved as `.jpg` still verifies as a PNG.
///
/// Decoding runs under an explicit allocation cap. A file that exceeds it, or
/// that uses a codec feature the decoder lacks, is reported as
/// [`ValidationOutcome::Inconclusive`] and never as invalid.
#[derive(Debug, Clone, Copy)]
pub struct ImageValidator {
    max_alloc: u64,
}

impl ImageValidator {
    pub fn new() -> Self {
        Self::with_max_alloc(DEFAULT_IMAGE_MAX_ALLOC)
    }

    /// Cap the bytes a single decode may allocate
    pub fn with_max_alloc(max_alloc: u64) -> Self {
        Self { max_alloc }
    }

    fn verify(&self, path: &Path) -> ValidationOutcome {
        let mut reader = match ImageReader::open(path) {
            Ok(reader) => reader,
            Err(e) => return ValidationOutcome::invalid(format!("open failed: {}", e)),
        };
        reader = match reader.with_guessed_format() {
            Ok(reader) => reader,
            Err(e) => return ValidationOutcome::invalid(format!("read failed: {}", e)),
        };

        if reader.format().is_none() {
            return ValidationOutcome::invalid("unrecognized image format");
        }

        let mut limits = Limits::default();
        limits.max_alloc = Some(self.max_alloc);
        reader.limits(limits);

        match reader.decode() {
            Ok(_) => ValidationOutcome::Valid,
            Err(e @ ImageError::Limits(_)) | Err(e @ ImageError::Unsupported(_)) => {
                ValidationOutcome::inconclusive(format!("cannot verify: {}", e))
            }
            Err(e) => ValidationOutcome::invalid(format!("decode failed: {}", e)),
        }
    }
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ImageValidator {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn validate(&self, path: &Path) -> Result<ValidationOutcome, ValidatorError> {
        Ok(self.verify(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;
    use tempfile::TempDir;

    fn write_jpeg(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = RgbImage::from_pixel(16, 16, Rgb([200, 40, 40]));
        img.save_with_format(&path, image::ImageFormat::Jpeg).unwrap();
        path
    }

    #[test]
    fn test_valid_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_jpeg(temp_dir.path(), "photo.jpeg");

        let outcome = ImageValidator::new().validate(&path).unwrap();
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_text_renamed_to_jpeg_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.jpeg");
        fs::write(&path, "just some text, not an image").unwrap();

        let outcome = ImageValidator::new().validate(&path).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_truncated_jpeg_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_jpeg(temp_dir.path(), "cut.jpg");
        let bytes = fs::read(&path).unwrap();
        // Cut inside the header segments
        fs::write(&path, &bytes[..10]).unwrap();

        let outcome = ImageValidator::new().validate(&path).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_empty_file_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.png");
        fs::File::create(&path).unwrap();

        let outcome = ImageValidator::new().validate(&path).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn test_missing_file_is_invalid_not_error() {
        let outcome = ImageValidator::new()
            .validate(Path::new("/tmp/this_image_does_not_exist_xyz123.jpg"))
            .unwrap();
        assert!(matches!(outcome, ValidationOutcome::Invalid { .. }));
    }

    #[test]
    fn test_image_over_alloc_cap_is_inconclusive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.png");
        RgbImage::from_pixel(256, 256, Rgb([0, 0, 0]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        // 256 * 256 * 3 bytes does not fit in 4 KiB
        let outcome = ImageValidator::with_max_alloc(4 * 1024).validate(&path).unwrap();
        assert!(matches!(outcome, ValidationOutcome::Inconclusive { .. }), "{}", outcome);

        let outcome = ImageValidator::new().validate(&path).unwrap();
        assert!(outcome.is_valid());
    }
}
