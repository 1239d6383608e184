use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the storage layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be decoded into the expected shape.
    #[error("Malformed document under key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded before writing.
    #[error("Could not encode document for key {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The storage file exists but is not a JSON object of string values.
    #[error("Storage file {path} is corrupt: {source}")]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the store.
pub type Result<T> = std::result::Result<T, StoreError>;
