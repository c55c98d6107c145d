use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::provider::Provider;

/// The `registry.json` document.
///
/// Extensions are kept as raw JSON so that malformed records reach the
/// normalizer instead of failing the whole document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegistryFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub extensions: Vec<Value>,
}

/// The `providers.json` document.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub providers: Vec<Provider>,
}
