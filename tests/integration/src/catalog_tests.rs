//! Catalog snapshot, queries and review overlay over the joined fixtures

use std::path::Path;

use market_meta::{Category, Price, ProviderMap};
use market_registry::reviews::{apply_stats, load_reviews, stats_by_slug};
use market_registry::{CatalogHandle, FileSource, FilterOptions, ITEMS_PER_PAGE};
use pretty_assertions::assert_eq;

fn fixtures_source() -> FileSource {
    FileSource::in_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/registry"))
}

#[tokio::test]
async fn test_every_extension_has_a_provider() {
    let handle = CatalogHandle::new(fixtures_source(), ProviderMap::with_builtins());
    let catalog = handle.get().await.unwrap();

    assert_eq!(catalog.len(), 4);
    for item in catalog.extensions() {
        assert!(!item.provider.name.is_empty());
    }
    assert!(catalog.find("orphaned-block").unwrap().provider.is_unknown());
}

#[tokio::test]
async fn test_filters_combine() {
    let handle = CatalogHandle::new(fixtures_source(), ProviderMap::with_builtins());
    let catalog = handle.get().await.unwrap();

    let paid = FilterOptions {
        price: Some(Price::Paid),
        ..Default::default()
    };
    let page = catalog.query(&paid, 1, ITEMS_PER_PAGE);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].slug(), "zoom-lti");

    let native_redwood = FilterOptions {
        category: Some(Category::CoursewareNative),
        compatibility: Some("redwood".into()),
        ..Default::default()
    };
    let slugs: Vec<_> = catalog
        .query(&native_redwood, 1, ITEMS_PER_PAGE)
        .items
        .iter()
        .map(|i| i.slug())
        .collect();
    assert_eq!(slugs, vec!["poll-xblock", "orphaned-block"]);
}

#[tokio::test]
async fn test_pagination_and_facets() {
    let handle = CatalogHandle::new(fixtures_source(), ProviderMap::with_builtins());
    let catalog = handle.get().await.unwrap();

    let second = catalog.query(&FilterOptions::default(), 2, 3);
    assert_eq!(second.total_pages, 2);
    assert_eq!(second.items.len(), 1);
    assert!(catalog.query(&FilterOptions::default(), 3, 3).items.is_empty());

    let facets = catalog.facets();
    assert_eq!(facets.compatibility, vec!["palm", "quince", "redwood"]);
    assert_eq!(facets.licenses, vec!["AGPL-3.0", "MIT", "Proprietary"]);
}

#[tokio::test]
async fn test_review_overlay() {
    let handle = CatalogHandle::new(fixtures_source(), ProviderMap::with_builtins());
    let catalog = handle.get().await.unwrap();
    let reviews = load_reviews(
        &Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/registry/reviews.json"),
    )
    .unwrap();

    let mut items = catalog.extensions().to_vec();
    apply_stats(&mut items, &stats_by_slug(&reviews));

    let indigo = items.iter().find(|i| i.slug() == "tutor-indigo").unwrap();
    assert_eq!(indigo.extension.rating_avg, Some(4.3));
    assert_eq!(indigo.extension.rating_count, Some(3));

    // Unreviewed extensions keep registry values
    let poll = items.iter().find(|i| i.slug() == "poll-xblock").unwrap();
    assert_eq!(poll.extension.rating_avg, Some(4.5));
}
