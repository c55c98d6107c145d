//! Immutable catalog snapshot with explicit reload

use std::sync::Arc;

use chrono::{DateTime, Utc};
use market_meta::ProviderMap;
use tokio::sync::RwLock;

use crate::join::{JoinedExtension, load_joined_registry};
use crate::query::{Facets, FilterOptions, Page, paginate};
use crate::source::RegistrySource;
use crate::{Error, Result};

/// A loaded, read-only view of the joined registry.
#[derive(Debug, Clone)]
pub struct Catalog {
    extensions: Arc<[JoinedExtension]>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(extensions: Vec<JoinedExtension>) -> Self {
        Self {
            extensions: extensions.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn extensions(&self) -> &[JoinedExtension] {
        &self.extensions
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Look up one extension by exact slug.
    pub fn find(&self, slug: &str) -> Result<&JoinedExtension> {
        self.extensions
            .iter()
            .find(|e| e.slug() == slug)
            .ok_or_else(|| Error::NotFound {
                slug: slug.to_string(),
            })
    }

    /// Filter, then return the requested 1-based page.
    pub fn query(&self, filters: &FilterOptions, page: usize, per_page: usize) -> Page<'_> {
        paginate(filters.apply(&self.extensions), page, per_page)
    }

    pub fn facets(&self) -> Facets {
        Facets::collect(&self.extensions)
    }
}

/// Lazily loaded catalog shared by readers.
///
/// The first [`get`](CatalogHandle::get) loads the registry; later calls
/// return the same snapshot until [`reload`](CatalogHandle::reload)
/// replaces it.
pub struct CatalogHandle<S> {
    source: S,
    providers: ProviderMap,
    current: RwLock<Option<Arc<Catalog>>>,
}

impl<S: RegistrySource> CatalogHandle<S> {
    pub fn new(source: S, providers: ProviderMap) -> Self {
        Self {
            source,
            providers,
            current: RwLock::new(None),
        }
    }

    /// The current snapshot, loading it on first use.
    pub async fn get(&self) -> Result<Arc<Catalog>> {
        if let Some(catalog) = self.current.read().await.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let mut slot = self.current.write().await;
        // Another reader may have loaded it while we waited
        if let Some(catalog) = slot.as_ref() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(self.load().await?);
        *slot = Some(Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Load a fresh snapshot and swap it in.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<Catalog>> {
        let catalog = Arc::new(self.load().await?);
        *self.current.write().await = Some(Arc::clone(&catalog));
        tracing::info!("Catalog reloaded ({} extensions)", catalog.len());
        Ok(catalog)
    }

    /// Whether a snapshot has been loaded.
    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn load(&self) -> Result<Catalog> {
        let extensions = load_joined_registry(&self.source, &self.providers).await?;
        Ok(Catalog::new(extensions))
    }
}
