use serde::{Deserialize, Serialize};

use super::category::{Category, Price};

/// A canonical registry extension.
///
/// Produced by the [`Normalizer`](crate::Normalizer); every field is
/// populated and enumerations hold canonical values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Extension {
    pub name: String,
    /// Unique, URL-safe identifier
    pub slug: String,
    #[serde(alias = "type")]
    pub category: Category,
    pub latest_version: String,
    /// Compatible platform release tags (e.g. "palm", "quince")
    pub core_compat: Vec<String>,
    pub description_short: String,
    pub description_long: String,
    /// Foreign key into the provider set
    pub provider_id: String,
    pub repo_url: String,
    pub license: String,
    pub price: Price,
    pub rating_avg: Option<f64>,
    pub rating_count: Option<u64>,
    pub install_notes: String,
    /// Screenshot URLs in display order
    pub screenshots: Vec<String>,
}
