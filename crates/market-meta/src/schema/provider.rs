use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Kind of organization publishing extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Organization,
    Individual,
    Community,
}

/// A publisher of extensions, as stored in `providers.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Provider {
    pub id: String,
    /// Empty when the record has none; the join shows the id instead
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub founded: Option<String>,
    #[serde(default)]
    pub headquarters: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "null_as_default"
    )]
    pub provider_type: ProviderType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specializations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
}

impl Provider {
    /// Display name of the synthetic fallback provider.
    pub const UNKNOWN_NAME: &'static str = "Unknown Provider";

    /// A provider with only identity fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: String::new(),
            logo: String::new(),
            description: None,
            website: None,
            contact_email: None,
            founded: None,
            headquarters: None,
            provider_type: ProviderType::Organization,
            specializations: Vec::new(),
            verified: false,
        }
    }

    /// The placeholder embedded when a `provider_id` does not resolve.
    pub fn unknown() -> Self {
        Self::new(crate::UNKNOWN_PROVIDER_ID, Self::UNKNOWN_NAME)
    }

    pub fn is_unknown(&self) -> bool {
        self.id == crate::UNKNOWN_PROVIDER_ID
    }
}
