//! Detect providers for records stuck on `"unknown"`

use std::path::Path;

use market_fs::JsonStore;
use market_meta::detection::classify_signals;
use market_meta::{ContentSignals, UNKNOWN_PROVIDER_ID};
use serde_json::{Map, Value};

use crate::document::{self, as_object_mut, display_name, str_field};
use crate::Result;

/// What happened to one unknown-provider record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    Fixed { name: String, provider_id: String },
    Undetected { name: String },
}

/// Outcome of a fix run, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixReport {
    pub outcomes: Vec<FixOutcome>,
}

impl FixReport {
    /// Fixed records as `(name, provider_id)`.
    pub fn fixed(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FixOutcome::Fixed { name, provider_id } => {
                    Some((name.as_str(), provider_id.as_str()))
                }
                FixOutcome::Undetected { .. } => None,
            })
            .collect()
    }

    /// Names of records the classifier could not place.
    pub fn undetected(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FixOutcome::Undetected { name } => Some(name.as_str()),
                FixOutcome::Fixed { .. } => None,
            })
            .collect()
    }

    pub fn fixed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FixOutcome::Fixed { .. }))
            .count()
    }
}

/// Run content detection over every record whose `provider_id` is
/// `"unknown"` and write back any id it finds.
///
/// Records with any other provider id are never touched.
pub fn fix_unknown_providers(doc: &mut Value) -> Result<FixReport> {
    let mut report = FixReport::default();

    for (index, ext) in document::extensions_mut(doc)?.iter_mut().enumerate() {
        let obj = as_object_mut(ext, index)?;
        if str_field(obj, "provider_id") != Some(UNKNOWN_PROVIDER_ID) {
            continue;
        }

        let name = display_name(obj);
        let detected = classify_signals(&signals(obj));

        if detected == UNKNOWN_PROVIDER_ID {
            tracing::debug!("No provider detected for {}", name);
            report.outcomes.push(FixOutcome::Undetected { name });
        } else {
            obj.insert(
                "provider_id".to_string(),
                Value::String(detected.to_string()),
            );
            report.outcomes.push(FixOutcome::Fixed {
                name,
                provider_id: detected.to_string(),
            });
        }
    }

    Ok(report)
}

/// Fix the registry file at `path` and write it back.
///
/// Nothing is written when no record changed or in a dry run.
pub fn fix_file(path: &Path, store: &JsonStore, dry_run: bool) -> Result<FixReport> {
    let mut doc: Value = store.load(path)?;
    let report = fix_unknown_providers(&mut doc)?;

    if dry_run {
        tracing::info!("Dry run: {} not written", path.display());
    } else if report.fixed_count() > 0 {
        store.save(path, &doc)?;
    }
    Ok(report)
}

fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or_default()
}

/// Detection signals read straight from a raw record.
fn signals(obj: &Map<String, Value>) -> ContentSignals {
    let screenshots: Vec<String> = obj
        .get("screenshots")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    ContentSignals::new(
        text(obj, "name"),
        text(obj, "description_short"),
        text(obj, "description_long"),
        text(obj, "install_notes"),
        text(obj, "repo_url"),
        &screenshots,
    )
}
