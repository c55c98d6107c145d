//! Typed JSON document loading and saving

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::io::{self, WriteMode};
use crate::{Error, Result};

/// JSON document store for registry files.
///
/// Documents are written pretty-printed with 2-space indentation, which
/// is what the published `registry.json` and `providers.json` use.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStore {
    mode: WriteMode,
}

impl JsonStore {
    /// Create a store that overwrites files in place.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with an explicit write mode.
    pub fn with_mode(mode: WriteMode) -> Self {
        Self { mode }
    }

    /// The write mode used by [`JsonStore::save`].
    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    /// Load and deserialize a JSON document.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = io::read_text(path)?;
        parse(path, &content)
    }

    /// Serialize and write a JSON document.
    pub fn save<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let mut content = to_pretty(path, value)?;
        content.push('\n');
        io::write_with_mode(path, content.as_bytes(), self.mode)
    }
}

/// Parse JSON text, attributing failures to `path`.
pub fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    serde_json::from_str(content).map_err(|e| Error::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Render a value as 2-space pretty JSON.
pub fn to_pretty<T: Serialize>(path: &Path, value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::JsonSerialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
