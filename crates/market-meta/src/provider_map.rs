//! Provider name→id table - SINGLE SOURCE OF TRUTH
//!
//! Maps provider display names, as they were historically recorded in the
//! registry, to canonical provider ids. The migration tools and the runtime
//! pipeline all resolve names through this one table.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use market_fs::JsonStore;
use regex::Regex;

use crate::{Error, Result, UNKNOWN_PROVIDER_ID};

/// Number of built-in name entries.
pub const BUILTIN_COUNT: usize = 29;

/// Built-in display name → provider id entries.
///
/// Keys are case-sensitive. Spelling and casing variants seen in the
/// registry are listed separately and point at the same id.
pub const BUILTIN_NAMES: [(&str, &str); BUILTIN_COUNT] = [
    ("Open edX / Axim Collaborative", "open-edx-axim"),
    ("Axim collaborative", "open-edx-axim"),
    ("Raccoon Gang", "raccoon-gang"),
    ("Overhang.io", "overhang-io"),
    ("Overhang.IO", "overhang-io"),
    ("OpenCraft", "opencraft"),
    ("edunext", "edunext"),
    ("eduNEXT", "edunext"),
    ("Appsembler", "appsembler"),
    ("edly", "edly"),
    ("hastexo", "hastexo"),
    ("MIT xPRO", "mitxpro"),
    ("MIT Office of distant learning", "mitxpro"),
    ("Stanford Online", "stanford-online"),
    ("Microsoft", "microsoft"),
    ("Google", "google"),
    ("IntelliBoard", "intelliboard"),
    ("Proversity", "proversity"),
    ("Triboo", "triboo"),
    ("HarvardX", "harvard"),
    ("openfun", "openfun"),
    ("Universidad de Chile", "universidad-chile"),
    ("Examus Inc", "examus"),
    ("Open learning initiative", "oli"),
    ("Jazkarta", "jazkarta"),
    ("IBL education", "ibl-education"),
    ("UBC - University of British Columbia", "ubc"),
    ("Abstract-Technology", "abstract-technology"),
    ("edX.org", "edx-org"),
];

static BUILTIN: LazyLock<ProviderMap> = LazyLock::new(ProviderMap::with_builtins);

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("static slug pattern"));

/// Provider name→id lookup table.
///
/// # Example
///
/// ```
/// use market_meta::ProviderMap;
///
/// let map = ProviderMap::builtin();
/// assert_eq!(map.resolve("eduNEXT"), "edunext");
/// assert_eq!(map.resolve("Foo Bar!!"), "foo-bar");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProviderMap {
    ids: HashMap<String, String>,
}

impl ProviderMap {
    /// Create an empty map. Every name resolves through slug derivation.
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Create an owned map holding the built-in entries.
    pub fn with_builtins() -> Self {
        let mut map = Self::new();
        for (name, id) in BUILTIN_NAMES {
            map.register(name, id);
        }
        map
    }

    /// Shared instance of the built-in table.
    pub fn builtin() -> &'static ProviderMap {
        &BUILTIN
    }

    /// Register a name. Replaces any previous id for the same name.
    pub fn register(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.ids.insert(name.into(), id.into());
    }

    /// Merge entries from a JSON object file (`{"Display Name": "id"}`).
    ///
    /// Returns the number of entries read. Later entries override
    /// built-in ones with the same name.
    pub fn load_overrides(&mut self, path: &Path) -> Result<usize> {
        let entries: HashMap<String, String> =
            JsonStore::new().load(path).map_err(|e| match e {
                market_fs::Error::JsonParse { path, message } => {
                    Error::InvalidProviderMap { path, message }
                }
                other => Error::Fs(other),
            })?;

        let count = entries.len();
        for (name, id) in entries {
            if id.trim().is_empty() {
                return Err(Error::InvalidProviderMap {
                    path: path.to_path_buf(),
                    message: format!("empty id for provider name '{name}'"),
                });
            }
            self.register(name, id);
        }
        tracing::debug!("Loaded {} provider name overrides from {}", count, path.display());
        Ok(count)
    }

    /// Exact, case-sensitive table lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.ids.get(name).map(String::as_str)
    }

    /// Resolve a provider display name to a provider id.
    ///
    /// Table hits win. Anything else is slugified: lowercased, whitespace
    /// runs collapsed to `-`, then every character outside `[a-z0-9-]`
    /// dropped. An empty name, or one that slugifies to nothing, resolves
    /// to `"unknown"`.
    pub fn resolve(&self, name: &str) -> String {
        let name = if name.is_empty() {
            UNKNOWN_PROVIDER_ID
        } else {
            name
        };

        if let Some(id) = self.get(name) {
            return id.to_string();
        }

        let slug = derive_slug(name);
        if slug.is_empty() {
            UNKNOWN_PROVIDER_ID.to_string()
        } else {
            slug
        }
    }

    /// Distinct provider ids in the table, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.ids.values().map(String::as_str).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ids.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids.values().any(|v| v == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Slug fallback used for names missing from the table.
pub fn derive_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&hyphenated, "").into_owned()
}
