//! Joining extensions with their providers
//!
//! Every extension carries a `provider_id`. The join embeds the matching
//! provider record so consumers get one self-contained value per
//! extension. Ids that do not resolve are not an error: the synthetic
//! "Unknown Provider" is embedded instead and a warning is logged.

use std::collections::HashMap;

use market_fs::json;
use market_meta::{Extension, Normalizer, Provider, ProviderFile, ProviderMap, RegistryFile};
use serde::{Deserialize, Serialize};

use crate::source::{RegistrySource, Resource};
use crate::{Error, Result};

/// An extension with its provider embedded.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JoinedExtension {
    #[serde(flatten)]
    pub extension: Extension,
    pub provider: Provider,
}

impl JoinedExtension {
    pub fn slug(&self) -> &str {
        &self.extension.slug
    }

    pub fn name(&self) -> &str {
        &self.extension.name
    }
}

/// Case-insensitive provider lookup by id.
#[derive(Debug, Clone, Default)]
pub struct ProviderIndex {
    by_id: HashMap<String, Provider>,
}

impl ProviderIndex {
    /// Index providers by lowercased id. The first record wins on
    /// duplicate ids. A provider without a name is named after its id.
    pub fn new(providers: &[Provider]) -> Self {
        let mut by_id = HashMap::with_capacity(providers.len());
        for provider in providers {
            let key = provider.id.to_lowercase();
            if by_id.contains_key(&key) {
                tracing::warn!("Duplicate provider id '{}' ignored", provider.id);
                continue;
            }
            let mut provider = provider.clone();
            if provider.name.trim().is_empty() {
                provider.name = provider.id.clone();
            }
            by_id.insert(key, provider);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.by_id.get(&id.to_lowercase())
    }

    /// The provider for `id`, or the Unknown Provider placeholder.
    pub fn resolve_or_unknown(&self, id: &str, slug: &str) -> Provider {
        match self.get(id) {
            Some(provider) => provider.clone(),
            None => {
                tracing::warn!("Provider not found for extension {}: {}", slug, id);
                Provider::unknown()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Embed providers into normalized extensions, keeping input order.
pub fn join(extensions: Vec<Extension>, providers: &[Provider]) -> Vec<JoinedExtension> {
    let index = ProviderIndex::new(providers);
    extensions
        .into_iter()
        .map(|extension| {
            let provider = index.resolve_or_unknown(&extension.provider_id, &extension.slug);
            JoinedExtension {
                extension,
                provider,
            }
        })
        .collect()
}

/// Normalize the registry's raw records and join them with the providers.
pub fn join_documents(
    registry: &RegistryFile,
    providers: &ProviderFile,
    map: &ProviderMap,
) -> Vec<JoinedExtension> {
    let extensions = Normalizer::with_map(map).normalize_all(&registry.extensions);
    join(extensions, &providers.providers)
}

/// Load both documents from `source` concurrently and join them.
///
/// Both fetches must succeed; if either fails the whole load fails and no
/// partial result is returned.
pub async fn load_joined_registry<S>(source: &S, map: &ProviderMap) -> Result<Vec<JoinedExtension>>
where
    S: RegistrySource + ?Sized,
{
    let (registry_text, providers_text) = tokio::try_join!(
        source.fetch(Resource::Registry),
        source.fetch(Resource::Providers)
    )?;

    let registry: RegistryFile = parse(Resource::Registry, &registry_text)?;
    let providers: ProviderFile = parse(Resource::Providers, &providers_text)?;

    let joined = join_documents(&registry, &providers, map);
    tracing::info!(
        "Loaded {} extensions with {} providers",
        joined.len(),
        providers.providers.len()
    );
    Ok(joined)
}

fn parse<T: serde::de::DeserializeOwned>(resource: Resource, text: &str) -> Result<T> {
    json::parse(std::path::Path::new(resource.file_name()), text)
        .map_err(|source| Error::Load { resource, source })
}
