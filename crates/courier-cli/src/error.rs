//! Error types for courier-cli

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for courier-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in courier-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration could not be resolved, parsed or written
    #[error("Config error: {0}")]
    Config(String),

    /// File system failure at a known path
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a config error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Wrap an I/O error with the path it occurred at
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
