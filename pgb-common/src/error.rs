//! Errors raised while reading or writing problem records

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or persist a problem record or result list
#[derive(Error, Debug)]
pub enum ProblemError {
    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record in {}: {}", .path.display(), .source)]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
