//! Error types shared by the relay and the client store

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while configuring or running the relay server
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Errors raised by durable storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
