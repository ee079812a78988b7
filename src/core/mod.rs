//! Format validators and the extension registry that dispatches to them

pub mod validator;
pub mod pdf_validator;
pub mod image_validator;
pub mod registry;

pub use validator::{ValidationOutcome, Validator, ValidatorError};
pub use pdf_validator::{CommandProbe, PdfProbe, PdfValidator, ProbeStatus};
pub use image_validator::ImageValidator;
pub use registry::ValidatorRegistry;
