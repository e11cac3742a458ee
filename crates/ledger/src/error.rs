//! Errors raised while loading configuration or snapshots.
//!
//! Ledger operations themselves report [`CoreError`] directly.

use coopcomply_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Inconsistent snapshot: {0}")]
    Snapshot(#[from] CoreError),
}

pub type LoadResult<T> = Result<T, LoadError>;
