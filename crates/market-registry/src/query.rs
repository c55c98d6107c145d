//! Search, filtering and pagination over joined extensions

use std::collections::BTreeSet;

use market_meta::{Category, Price};

use crate::join::JoinedExtension;

/// Extensions shown per listing page.
pub const ITEMS_PER_PAGE: usize = 20;

/// Listing filters. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Case-insensitive substring over name, short description and
    /// provider name
    pub search: Option<String>,
    pub category: Option<Category>,
    /// Required entry in `core_compat`
    pub compatibility: Option<String>,
    pub license: Option<String>,
    pub price: Option<Price>,
    /// Exact provider display name
    pub provider: Option<String>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, item: &JoinedExtension) -> bool {
        let ext = &item.extension;

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = ext.name.to_lowercase().contains(&needle)
                || ext.description_short.to_lowercase().contains(&needle)
                || item.provider.name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if self.category.is_some_and(|c| c != ext.category) {
            return false;
        }

        if let Some(tag) = &self.compatibility
            && !ext.core_compat.iter().any(|t| t == tag)
        {
            return false;
        }

        if self.license.as_ref().is_some_and(|l| *l != ext.license) {
            return false;
        }

        if self.price.is_some_and(|p| p != ext.price) {
            return false;
        }

        if self
            .provider
            .as_ref()
            .is_some_and(|name| *name != item.provider.name)
        {
            return false;
        }

        true
    }

    /// Items passing every filter, in catalog order.
    pub fn apply<'a>(&self, items: &'a [JoinedExtension]) -> Vec<&'a JoinedExtension> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a JoinedExtension>,
    /// 1-based page number
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` into 1-based pages of `per_page`.
///
/// Page 0 is treated as page 1. A page past the end is empty.
pub fn paginate<'a>(items: Vec<&'a JoinedExtension>, page: usize, per_page: usize) -> Page<'a> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

/// Distinct filter values present in a catalog, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub compatibility: Vec<String>,
    pub licenses: Vec<String>,
    pub providers: Vec<String>,
}

impl Facets {
    pub fn collect(items: &[JoinedExtension]) -> Self {
        let mut compatibility = BTreeSet::new();
        let mut licenses = BTreeSet::new();
        let mut providers = BTreeSet::new();

        for item in items {
            compatibility.extend(item.extension.core_compat.iter().cloned());
            licenses.insert(item.extension.license.clone());
            providers.insert(item.provider.name.clone());
        }

        Self {
            compatibility: compatibility.into_iter().collect(),
            licenses: licenses.into_iter().collect(),
            providers: providers.into_iter().collect(),
        }
    }
}
