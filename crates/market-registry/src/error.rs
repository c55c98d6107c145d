//! Error types for market-registry

use crate::source::Resource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A registry document could not be read or parsed.
    #[error("Failed to load {resource}: {source}")]
    Load {
        resource: Resource,
        #[source]
        source: market_fs::Error,
    },

    /// A registry source has nothing to serve for a document.
    #[error("{resource} is unavailable: {reason}")]
    Unavailable { resource: Resource, reason: String },

    #[error("Extension not found: {slug}")]
    NotFound { slug: String },

    #[error("Failed to load reviews: {0}")]
    Reviews(#[source] market_fs::Error),

    #[error("Invalid review: {reason}")]
    InvalidReview { reason: String },
}
