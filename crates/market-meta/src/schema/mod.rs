//! Canonical registry schema
//!
//! Shapes of the two static documents (`registry.json`, `providers.json`)
//! and of the records they contain.

mod category;
mod documents;
mod extension;
mod provider;

pub use category::{Category, LegacyCategory, Price};
pub use documents::{ProviderFile, RegistryFile};
pub use extension::Extension;
pub use provider::{Provider, ProviderType};

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
