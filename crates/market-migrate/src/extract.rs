//! Extract embedded provider objects into a provider set
//!
//! Legacy registries embed `provider: {name, url, logo}` in every
//! extension. Extraction deduplicates those objects by
//! `(lowercase(trim(name)), url)`, assigns each distinct provider an id via
//! the provider table and rewrites every extension to reference it by
//! `provider_id`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use market_fs::JsonStore;
use market_meta::{Provider, ProviderFile, ProviderMap, UNKNOWN_PROVIDER_ID};
use serde_json::{Map, Value};

use crate::document::{self, as_object, display_name, str_field};
use crate::Result;

/// Version stamped on rewritten registry documents.
pub const REGISTRY_VERSION: &str = "2.0";

/// Version stamped on generated provider documents.
pub const PROVIDERS_VERSION: &str = "1.0";

/// Result of an extraction: both documents to write.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub registry: Value,
    pub providers: ProviderFile,
    pub report: ExtractReport,
}

/// Summary of an extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub extension_count: usize,
    /// Provider name and number of extensions referencing it, in
    /// first-seen order
    pub provider_counts: Vec<(String, usize)>,
}

impl ExtractReport {
    pub fn provider_count(&self) -> usize {
        self.provider_counts.len()
    }
}

/// Split the embedded providers out of a legacy registry document.
///
/// Records without a usable provider object keep their `provider_id`
/// (or get `"unknown"`) and contribute no provider.
pub fn extract_providers(
    doc: &Value,
    map: &ProviderMap,
    now: DateTime<Utc>,
) -> Result<Extraction> {
    let mut providers: Vec<Provider> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut used_ids: HashSet<String> = HashSet::new();
    let mut counts: Vec<usize> = Vec::new();
    let mut extensions = Vec::new();

    for (index, ext) in document::extensions(doc)?.iter().enumerate() {
        let obj = as_object(ext, index)?;
        let mut rewritten = obj.clone();
        let legacy = rewritten.shift_remove("provider");

        let provider_id = match legacy.as_ref().and_then(LegacyProvider::from_value) {
            Some(legacy) => {
                let key = legacy.key();
                let slot = match by_key.get(&key) {
                    Some(&slot) => slot,
                    None => {
                        let id = unique_id(map.resolve(&legacy.name), &mut used_ids);
                        providers.push(legacy.into_provider(id));
                        counts.push(0);
                        by_key.insert(key, providers.len() - 1);
                        providers.len() - 1
                    }
                };
                counts[slot] += 1;
                providers[slot].id.clone()
            }
            None => {
                tracing::warn!("No provider object on {}", display_name(obj));
                str_field(obj, "provider_id")
                    .unwrap_or(UNKNOWN_PROVIDER_ID)
                    .to_string()
            }
        };

        rewritten.insert("provider_id".to_string(), Value::String(provider_id));
        extensions.push(Value::Object(rewritten));
    }

    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let report = ExtractReport {
        extension_count: extensions.len(),
        provider_counts: providers
            .iter()
            .zip(&counts)
            .map(|(p, &n)| (p.name.clone(), n))
            .collect(),
    };

    let mut registry = Map::new();
    registry.insert("version".into(), Value::from(REGISTRY_VERSION));
    registry.insert("last_updated".into(), Value::from(stamp.clone()));
    registry.insert("extensions".into(), Value::Array(extensions));

    Ok(Extraction {
        registry: Value::Object(registry),
        providers: ProviderFile {
            version: Some(PROVIDERS_VERSION.to_string()),
            last_updated: Some(stamp),
            providers,
        },
        report,
    })
}

/// Extract from the registry at `registry_path`, writing both documents.
pub fn extract_files(
    registry_path: &Path,
    providers_path: &Path,
    store: &JsonStore,
    map: &ProviderMap,
    dry_run: bool,
) -> Result<ExtractReport> {
    let doc: Value = store.load(registry_path)?;
    let extraction = extract_providers(&doc, map, Utc::now())?;

    if dry_run {
        tracing::info!("Dry run: registry and providers not written");
    } else {
        store.save(registry_path, &extraction.registry)?;
        store.save(providers_path, &serde_json::to_value(&extraction.providers)?)?;
    }
    Ok(extraction.report)
}

/// The `{name, url, logo}` object found on legacy records.
struct LegacyProvider {
    name: String,
    url: String,
    logo: String,
}

impl LegacyProvider {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = str_field(obj, "name")?.to_string();
        Some(Self {
            name,
            url: str_field(obj, "url").unwrap_or_default().to_string(),
            logo: str_field(obj, "logo").unwrap_or_default().to_string(),
        })
    }

    fn key(&self) -> String {
        format!("{}-{}", self.name.to_lowercase().trim(), self.url)
    }

    fn into_provider(self, id: String) -> Provider {
        let mut provider = Provider::new(id, self.name);
        provider.website = (!self.url.is_empty()).then(|| self.url.clone());
        provider.url = self.url;
        provider.logo = self.logo;
        provider
    }
}

/// `id`, or `id-2`, `id-3`, ... when already taken.
fn unique_id(id: String, used: &mut HashSet<String>) -> String {
    let mut candidate = id.clone();
    let mut suffix = 2;
    while used.contains(&candidate) {
        candidate = format!("{id}-{suffix}");
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn legacy(name: &str, url: &str) -> Value {
        json!({"name": format!("ext by {name}"), "provider": {"name": name, "url": url, "logo": ""}})
    }

    #[test]
    fn test_dedup_by_name_and_url() {
        let doc = json!({"extensions": [
            legacy("OpenCraft", "https://opencraft.com"),
            legacy(" opencraft ", "https://opencraft.com"),
            legacy("eduNEXT", "https://edunext.co"),
        ]});

        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();

        assert_eq!(out.providers.providers.len(), 2);
        assert_eq!(
            out.report.provider_counts,
            vec![("OpenCraft".to_string(), 2), ("eduNEXT".to_string(), 1)]
        );
        assert_eq!(out.registry["extensions"][1]["provider_id"], "opencraft");
    }

    #[test]
    fn test_same_name_different_url_gets_distinct_ids() {
        let doc = json!({"extensions": [
            legacy("Overhang.io", "https://overhang.io"),
            legacy("Overhang.IO", "https://docs.tutor.overhang.io"),
        ]});

        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();

        let ids: Vec<_> = out.providers.providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["overhang-io", "overhang-io-2"]);
        assert_eq!(out.registry["extensions"][1]["provider_id"], "overhang-io-2");
    }

    #[test]
    fn test_documents_are_stamped() {
        let doc = json!({"extensions": [legacy("Google", "https://google.com")]});

        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();

        assert_eq!(out.registry["version"], "2.0");
        assert_eq!(out.registry["last_updated"], "2024-05-01T12:00:00.000Z");
        assert_eq!(out.providers.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_extracted_provider_shape() {
        let doc = json!({"extensions": [legacy("Google", "https://google.com")]});

        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();
        let provider = serde_json::to_value(&out.providers.providers[0]).unwrap();

        assert_eq!(
            provider,
            json!({
                "id": "google",
                "name": "Google",
                "url": "https://google.com",
                "logo": "",
                "description": null,
                "website": "https://google.com",
                "contact_email": null,
                "founded": null,
                "headquarters": null,
                "type": "organization",
                "specializations": [],
                "verified": false
            })
        );
    }

    #[test]
    fn test_record_without_provider_keeps_id() {
        let doc = json!({"extensions": [{"name": "A", "provider_id": "edly"}, {"name": "B"}]});

        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();

        assert!(out.providers.providers.is_empty());
        assert_eq!(out.registry["extensions"][0]["provider_id"], "edly");
        assert_eq!(out.registry["extensions"][1]["provider_id"], "unknown");
    }

    #[test]
    fn test_provider_object_is_removed() {
        let doc = json!({"extensions": [legacy("Google", "")]});
        let out = extract_providers(&doc, ProviderMap::builtin(), fixed_now()).unwrap();
        assert!(out.registry["extensions"][0].get("provider").is_none());
        assert_eq!(out.providers.providers[0].website, None);
    }
}
