use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading scanner output or deriving libraries from it.
///
/// All of these mean the input does not look like what the tool expects;
/// none are recoverable.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File entry {path} has no license_detections field")]
    MissingDetections { path: String },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Cannot derive a library name from {path}: expected at least {required} path components")]
    LibraryPath { path: String, required: usize },
}
