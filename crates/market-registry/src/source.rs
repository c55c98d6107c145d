//! Where registry documents come from

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{Error, Result};

/// Default file name of the extension registry.
pub const REGISTRY_FILE: &str = "registry.json";

/// Default file name of the provider set.
pub const PROVIDERS_FILE: &str = "providers.json";

/// The two documents the join pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Registry,
    Providers,
}

impl Resource {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Registry => REGISTRY_FILE,
            Self::Providers => PROVIDERS_FILE,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Read-only access to the raw registry documents.
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetch the raw JSON text of a document.
    async fn fetch(&self, resource: Resource) -> Result<String>;
}

/// Reads documents from the filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    registry_path: PathBuf,
    providers_path: PathBuf,
}

impl FileSource {
    pub fn new(registry_path: impl Into<PathBuf>, providers_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            providers_path: providers_path.into(),
        }
    }

    /// Both documents under their default names in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(REGISTRY_FILE), dir.join(PROVIDERS_FILE))
    }

    pub fn path(&self, resource: Resource) -> &Path {
        match resource {
            Resource::Registry => &self.registry_path,
            Resource::Providers => &self.providers_path,
        }
    }
}

#[async_trait]
impl RegistrySource for FileSource {
    async fn fetch(&self, resource: Resource) -> Result<String> {
        let path = self.path(resource);
        tracing::debug!("Reading {} from {}", resource, path.display());
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Load {
                resource,
                source: market_fs::Error::io(path, e),
            })
    }
}

/// Serves documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    registry: Option<String>,
    providers: Option<String>,
}

impl StaticSource {
    pub fn new(registry: impl Into<String>, providers: impl Into<String>) -> Self {
        Self {
            registry: Some(registry.into()),
            providers: Some(providers.into()),
        }
    }

    /// Source whose registry document is missing.
    pub fn without_registry(providers: impl Into<String>) -> Self {
        Self {
            registry: None,
            providers: Some(providers.into()),
        }
    }

    /// Source whose provider document is missing.
    pub fn without_providers(registry: impl Into<String>) -> Self {
        Self {
            registry: Some(registry.into()),
            providers: None,
        }
    }
}

#[async_trait]
impl RegistrySource for StaticSource {
    async fn fetch(&self, resource: Resource) -> Result<String> {
        let doc = match resource {
            Resource::Registry => &self.registry,
            Resource::Providers => &self.providers,
        };
        doc.clone().ok_or_else(|| Error::Unavailable {
            resource,
            reason: "no document configured".to_string(),
        })
    }
}
