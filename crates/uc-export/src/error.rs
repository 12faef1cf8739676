use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while writing the figure to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Temporary file creation or final rename failed.
    #[error("Écriture impossible vers {path} : {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The PNG encoder rejected the frame.
    #[error("Encodage PNG impossible : {0}")]
    Encode(String),
}
