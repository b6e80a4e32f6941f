use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read trace {}: {source}", .path.display())]
    TraceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write trace {}: {source}", .path.display())]
    TraceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed sample at {}:{line}: {source}", .path.display())]
    TraceParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to update results file {}: {message}", .path.display())]
    Results { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, CounterError>;
