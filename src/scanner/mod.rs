//! Directory traversal

pub mod file_scanner;

pub use file_scanner::{walk, FileCandidate, Walk, WalkError};
