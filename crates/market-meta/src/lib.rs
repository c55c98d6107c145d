//! Registry metadata for the extension marketplace.
//!
//! This crate owns the canonical data model, the shared provider
//! name→id table, provider identity resolution, content-based provider
//! detection and the normalizer that turns raw registry records into
//! canonical [`Extension`] values.

pub mod detection;
pub mod error;
pub mod normalize;
pub mod provider_map;
pub mod schema;

/// Provider id used when no provider could be determined.
pub const UNKNOWN_PROVIDER_ID: &str = "unknown";

pub use detection::{ContentSignals, DetectionRule, classify};
pub use error::{Error, Result};
pub use normalize::{Normalizer, normalize};
pub use provider_map::ProviderMap;
pub use schema::{
    Category, Extension, LegacyCategory, Price, Provider, ProviderFile, ProviderType,
    RegistryFile,
};
