use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid package snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("diff error: {0}")]
    Diff(#[from] pkgdiff_diff::DiffError),
}

pub type SdkResult<T> = Result<T, SdkError>;
