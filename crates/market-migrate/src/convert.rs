//! Replace embedded provider objects with `provider_id`

use std::path::Path;

use market_fs::JsonStore;
use market_meta::{ProviderMap, UNKNOWN_PROVIDER_ID};
use serde_json::Value;

use crate::document::{self, as_object_mut, display_name};
use crate::Result;

/// One converted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converted {
    pub name: String,
    pub provider_id: String,
    /// False when the record already had a `provider_id` and no
    /// `provider` object.
    pub changed: bool,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub records: Vec<Converted>,
}

impl ConvertReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn changed(&self) -> usize {
        self.records.iter().filter(|r| r.changed).count()
    }
}

/// Convert every extension in a registry document in place.
///
/// A record with a `provider` object gets `provider_id =
/// resolve(provider.name)` (or `"unknown"` without a name) and loses the
/// object. A record that already has `provider_id` and no `provider`
/// object is left alone, so running the conversion twice is a no-op.
pub fn convert_provider_ids(doc: &mut Value, map: &ProviderMap) -> Result<ConvertReport> {
    let mut report = ConvertReport::default();

    for (index, ext) in document::extensions_mut(doc)?.iter_mut().enumerate() {
        let obj = as_object_mut(ext, index)?;
        let name = display_name(obj);

        let existing = document::str_field(obj, "provider_id").map(str::to_string);
        let provider = obj.shift_remove("provider");

        let (provider_id, changed) = match (provider, existing) {
            (None, Some(id)) => (id, false),
            (provider, _) => {
                let provider_name = provider
                    .as_ref()
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNKNOWN_PROVIDER_ID);
                (map.resolve(provider_name), true)
            }
        };

        if changed {
            obj.insert("provider_id".to_string(), Value::String(provider_id.clone()));
        }
        tracing::debug!("Converted {}: {}", name, provider_id);
        report.records.push(Converted {
            name,
            provider_id,
            changed,
        });
    }

    Ok(report)
}

/// Convert the registry file at `path` and write it back.
pub fn convert_file(
    path: &Path,
    store: &JsonStore,
    map: &ProviderMap,
    dry_run: bool,
) -> Result<ConvertReport> {
    let mut doc: Value = store.load(path)?;
    let report = convert_provider_ids(&mut doc, map)?;

    if dry_run {
        tracing::info!("Dry run: {} not written", path.display());
    } else {
        store.save(path, &doc)?;
    }
    Ok(report)
}
