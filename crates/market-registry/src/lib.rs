//! Registry join pipeline for the extension marketplace.
//!
//! Loads `registry.json` and `providers.json` together, normalizes every
//! extension record, embeds its provider and exposes the result as an
//! immutable [`Catalog`] that can be searched, filtered and paginated.

pub mod catalog;
pub mod error;
pub mod join;
pub mod query;
pub mod reviews;
pub mod source;

pub use catalog::{Catalog, CatalogHandle};
pub use error::{Error, Result};
pub use join::{JoinedExtension, ProviderIndex, join, join_documents, load_joined_registry};
pub use query::{Facets, FilterOptions, ITEMS_PER_PAGE, Page, paginate};
pub use reviews::{ExtensionStats, Review};
pub use source::{FileSource, RegistrySource, Resource, StaticSource};
