//! Registry record normalization
//!
//! Converts raw, possibly legacy or malformed, registry records into
//! canonical [`Extension`] values. Normalization never fails: every field
//! that is missing or has the wrong shape is replaced with a safe default.
//!
//! Provider ids are assigned here too. A record's own `provider_id` is
//! kept; a legacy embedded `provider` object is resolved by name through
//! the [`ProviderMap`]; if that still yields `"unknown"` the content
//! classifier gets a chance.

use std::collections::HashSet;

use serde_json::Value;

use crate::detection::classify;
use crate::schema::{Category, Extension, LegacyCategory, Price};
use crate::{ProviderMap, UNKNOWN_PROVIDER_ID};

/// Name given to records without a usable name.
pub const UNKNOWN_EXTENSION_NAME: &str = "Unknown Extension";

/// License given to records without one.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Normalize a single record at position `index` with the built-in
/// provider table.
pub fn normalize(raw: &Value, index: usize) -> Extension {
    Normalizer::new().normalize(raw, index)
}

/// Stateful normalizer for one pass over a registry.
///
/// Tracks slugs already handed out so that the output of one pass never
/// contains duplicates.
#[derive(Debug)]
pub struct Normalizer<'a> {
    providers: &'a ProviderMap,
    seen_slugs: HashSet<String>,
}

impl Normalizer<'static> {
    pub fn new() -> Self {
        Self::with_map(ProviderMap::builtin())
    }
}

impl Default for Normalizer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Normalizer<'a> {
    pub fn with_map(providers: &'a ProviderMap) -> Self {
        Self {
            providers,
            seen_slugs: HashSet::new(),
        }
    }

    /// Normalize every record, in order.
    pub fn normalize_all(mut self, raws: &[Value]) -> Vec<Extension> {
        raws.iter()
            .enumerate()
            .map(|(index, raw)| self.normalize(raw, index))
            .collect()
    }

    /// Normalize one record.
    pub fn normalize(&mut self, raw: &Value, index: usize) -> Extension {
        let name = non_empty_str(raw, "name")
            .unwrap_or(UNKNOWN_EXTENSION_NAME)
            .to_string();
        let slug = self.claim_slug(raw, index);

        let mut ext = Extension {
            name,
            slug,
            category: category(raw),
            latest_version: string_or_empty(raw, "latest_version"),
            core_compat: string_list(raw, "core_compat", true),
            description_short: string_or_empty(raw, "description_short"),
            description_long: string_or_empty(raw, "description_long"),
            provider_id: UNKNOWN_PROVIDER_ID.to_string(),
            repo_url: string_or_empty(raw, "repo_url"),
            license: non_empty_str(raw, "license")
                .unwrap_or(UNKNOWN_LICENSE)
                .to_string(),
            price: raw
                .get("price")
                .and_then(Value::as_str)
                .and_then(Price::parse)
                .unwrap_or_default(),
            rating_avg: raw
                .get("rating_avg")
                .and_then(Value::as_f64)
                .filter(|r| r.is_finite()),
            rating_count: raw.get("rating_count").and_then(Value::as_u64),
            install_notes: string_or_empty(raw, "install_notes"),
            screenshots: string_list(raw, "screenshots", false),
        };

        ext.provider_id = self.assign_provider(raw, &ext);
        ext
    }

    fn claim_slug(&mut self, raw: &Value, index: usize) -> String {
        let candidate = match non_empty_str(raw, "slug") {
            Some(slug) if is_url_safe(slug) => {
                if self.seen_slugs.contains(slug) {
                    tracing::warn!("Duplicate slug '{}' at index {}", slug, index);
                    format!("{slug}-{index}")
                } else {
                    slug.to_string()
                }
            }
            Some(slug) => {
                tracing::debug!("Slug '{}' at index {} is not URL-safe", slug, index);
                placeholder_slug(index)
            }
            None => placeholder_slug(index),
        };

        let mut slug = candidate.clone();
        let mut suffix = 2;
        while self.seen_slugs.contains(&slug) {
            slug = format!("{candidate}-{suffix}");
            suffix += 1;
        }
        self.seen_slugs.insert(slug.clone());
        slug
    }

    fn assign_provider(&self, raw: &Value, ext: &Extension) -> String {
        let resolved = match non_empty_str(raw, "provider_id") {
            Some(id) => id.to_string(),
            None => {
                let legacy_name = raw
                    .get("provider")
                    .and_then(|p| p.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_PROVIDER_ID);
                self.providers.resolve(legacy_name)
            }
        };

        if resolved != UNKNOWN_PROVIDER_ID {
            return resolved;
        }

        let detected = classify(ext);
        if detected != UNKNOWN_PROVIDER_ID {
            tracing::debug!("Detected provider '{}' for '{}'", detected, ext.slug);
        }
        detected.to_string()
    }
}

/// Placeholder slug for records without a usable one.
pub fn placeholder_slug(index: usize) -> String {
    format!("unknown-{index}")
}

fn is_url_safe(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn non_empty_str<'v>(raw: &'v Value, key: &str) -> Option<&'v str> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

fn string_or_empty(raw: &Value, key: &str) -> String {
    raw.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// String elements of an array field; anything else becomes empty.
fn string_list(raw: &Value, key: &str, dedup: bool) -> Vec<String> {
    let Some(items) = raw.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items.iter().filter_map(Value::as_str) {
        if dedup && out.iter().any(|existing| existing == item) {
            continue;
        }
        out.push(item.to_string());
    }
    out
}

/// `category` wins over the older `type` key.
fn category(raw: &Value) -> Category {
    let value = ["category", "type"]
        .iter()
        .find_map(|key| raw.get(*key).and_then(Value::as_str));

    match value {
        Some(v) => Category::parse(v).unwrap_or_else(|| {
            if let Some(legacy) = LegacyCategory::parse(v) {
                tracing::debug!("Legacy category '{}' ({})", v, legacy.label());
            }
            Category::default()
        }),
        None => Category::default(),
    }
}
