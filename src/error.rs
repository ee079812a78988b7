//! Errors that abort a whole scan

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::validator::ValidatorError;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {} is not an accessible directory: {source}", .root.display())]
    RootInaccessible {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    ToolUnavailable(#[from] ValidatorError),

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
