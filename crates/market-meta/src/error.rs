//! Error types for market-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] market_fs::Error),

    #[error("Invalid provider map at {path}: {message}")]
    InvalidProviderMap { path: PathBuf, message: String },
}
