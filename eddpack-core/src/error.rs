use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EddError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("header template not found: {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    /// Failure while producing the outputs of one pair; aborts the run.
    #[error("pair '{base}' ({})", path.display())]
    Pair {
        base: String,
        path: PathBuf,
        #[source]
        source: Box<EddError>,
    },

    #[error("verify error: {0}")]
    Verify(String),
}

impl EddError {
    pub(crate) fn in_pair(base: &str, path: &Path, source: impl Into<EddError>) -> Self {
        EddError::Pair {
            base: base.to_string(),
            path: path.to_path_buf(),
            source: Box::new(source.into()),
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, EddError>;
