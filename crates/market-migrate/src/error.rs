//! Error types for market-migrate

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] market_fs::Error),

    #[error("Registry document has no 'extensions' array")]
    MissingExtensions,

    #[error("Extension at index {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Failed to serialize providers: {0}")]
    Serialize(#[from] serde_json::Error),
}
