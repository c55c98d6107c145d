//! Integration tests for provider identity resolution

use market_meta::ProviderMap;
use market_meta::provider_map::{BUILTIN_NAMES, derive_slug};
use proptest::prelude::*;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

#[rstest]
#[case("Open edX / Axim Collaborative", "open-edx-axim")]
#[case("Axim collaborative", "open-edx-axim")]
#[case("Overhang.IO", "overhang-io")]
#[case("MIT Office of distant learning", "mitxpro")]
#[case("HarvardX", "harvard")]
#[case("Universidad de Chile", "universidad-chile")]
#[case("UBC - University of British Columbia", "ubc")]
#[case("edX.org", "edx-org")]
fn test_table_hits(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(ProviderMap::builtin().resolve(name), expected);
}

#[rstest]
#[case("Foo Bar!!", "foo-bar")]
#[case("universidad de chile", "universidad-de-chile")]
#[case("OPENCRAFT", "opencraft")]
#[case("Overhang.io.", "overhangio")]
#[case("  Padded  Name ", "-padded-name-")]
fn test_derived_slugs(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(ProviderMap::builtin().resolve(name), expected);
}

#[test]
fn test_table_wins_over_derived_slug() {
    // Derivation would give "edxorg" and "harvardx"
    let map = ProviderMap::builtin();
    assert_ne!(derive_slug("edX.org"), "edx-org");
    assert_eq!(map.resolve("edX.org"), "edx-org");
    assert_eq!(map.resolve("HarvardX"), "harvard");
}

#[test]
fn test_every_builtin_entry_resolves_to_its_id() {
    let map = ProviderMap::builtin();
    for (name, id) in BUILTIN_NAMES {
        assert_eq!(map.resolve(name), id, "name {name}");
    }
}

#[test]
fn test_load_overrides_extends_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("provider-map.json");
    fs::write(
        &path,
        r#"{"Universidad de Chile.": "universidad-chile", "OpenCraft": "open-craft"}"#,
    )
    .unwrap();

    let mut map = ProviderMap::with_builtins();
    let count = map.load_overrides(&path).unwrap();

    assert_eq!(count, 2);
    assert_eq!(map.resolve("Universidad de Chile."), "universidad-chile");
    assert_eq!(map.resolve("OpenCraft"), "open-craft");
}

#[test]
fn test_load_overrides_rejects_non_object() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("provider-map.json");
    fs::write(&path, "[1, 2]").unwrap();

    let err = ProviderMap::new().load_overrides(&path).unwrap_err();
    assert!(matches!(err, market_meta::Error::InvalidProviderMap { .. }));
}

#[test]
fn test_load_overrides_rejects_empty_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("provider-map.json");
    fs::write(&path, r#"{"Acme": " "}"#).unwrap();

    assert!(ProviderMap::new().load_overrides(&path).is_err());
}

proptest! {
    #[test]
    fn prop_resolve_is_deterministic(name in ".{0,40}") {
        let map = ProviderMap::builtin();
        prop_assert_eq!(map.resolve(&name), map.resolve(&name));
    }

    #[test]
    fn prop_resolve_is_never_empty(name in ".{0,40}") {
        prop_assert!(!ProviderMap::builtin().resolve(&name).is_empty());
    }

    #[test]
    fn prop_derived_ids_use_slug_charset(name in "[A-Za-z0-9 .!_-]{1,40}") {
        let id = ProviderMap::new().resolve(&name);
        prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
