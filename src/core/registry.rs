//! Extension to validator dispatch table

use std::collections::HashMap;
use std::sync::Arc;

use super::image_validator::ImageValidator;
use super::pdf_validator::PdfValidator;
use super::validator::{Validator, ValidatorError};

/// Raster extensions routed to the image validator
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpeg", "jpg", "jpe", "png", "gif", "bmp", "tif", "tiff", "webp", "ico",
];

/// Fixed mapping from lowercase extension (without the dot) to a validator.
///
/// Built once before a scan and read-only afterwards.
#[derive(Default)]
pub struct ValidatorRegistry {
    by_extension: HashMap<String, Arc<dyn Validator>>,
}

impl ValidatorRegistry {
    /// Empty registry; every extension is skipped
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard table: `pdf` plus every raster extension in [`IMAGE_EXTENSIONS`]
    pub fn standard(pdf: PdfValidator) -> Self {
        let image: Arc<dyn Validator> = Arc::new(ImageValidator::new());
        let mut registry = Self::new().register("pdf", Arc::new(pdf));
        for ext in IMAGE_EXTENSIONS {
            registry = registry.register(ext, Arc::clone(&image));
        }
        registry
    }

    /// Add an entry. A leading dot and letter case are ignored.
    pub fn register(mut self, extension: &str, validator: Arc<dyn Validator>) -> Self {
        self.by_extension.insert(normalize(extension), validator);
        self
    }

    pub fn resolve(&self, extension: &str) -> Option<&dyn Validator> {
        self.by_extension
            .get(&normalize(extension))
            .map(|v| &**v)
    }

    pub fn extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.by_extension.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Run each distinct validator's preflight check once
    pub fn preflight(&self) -> Result<(), ValidatorError> {
        let mut checked: Vec<&Arc<dyn Validator>> = Vec::new();
        for validator in self.by_extension.values() {
            if checked.iter().any(|v| Arc::ptr_eq(v, validator)) {
                continue;
            }
            validator.preflight()?;
            checked.push(validator);
        }
        Ok(())
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ValidatorRegistry::standard(PdfValidator::default());

        assert_eq!(registry.resolve("pdf").map(|v| v.kind()), Some("PDF"));
        assert_eq!(registry.resolve("PDF").map(|v| v.kind()), Some("PDF"));
        assert_eq!(registry.resolve(".Pdf").map(|v| v.kind()), Some("PDF"));
        assert_eq!(registry.resolve("JPEG").map(|v| v.kind()), Some("image"));
    }

    #[test]
    fn test_unknown_extension_is_skipped() {
        let registry = ValidatorRegistry::standard(PdfValidator::default());

        assert!(registry.resolve("txt").is_none());
        assert!(registry.resolve("").is_none());
        assert!(registry.resolve("docx").is_none());
    }

    #[test]
    fn test_standard_extensions() {
        let registry = ValidatorRegistry::standard(PdfValidator::default());
        let exts = registry.extensions();

        assert!(exts.contains(&"pdf"));
        assert!(exts.contains(&"jpeg"));
        assert!(exts.contains(&"jpg"));
        assert_eq!(exts.len(), IMAGE_EXTENSIONS.len() + 1);
    }

    #[test]
    fn test_preflight_reports_missing_tool() {
        let registry =
            ValidatorRegistry::standard(PdfValidator::with_command("no-such-probe-binary-xyz"));
        assert!(registry.preflight().is_err());
    }
}
