//! Integration tests for content-based provider detection

use market_meta::detection::{ContentSignals, DETECTION_RULES, classify_signals};
use market_meta::{classify, normalize};
use rstest::rstest;
use serde_json::json;

#[test]
fn test_raccoon_gang_wins_over_official_name_guard() {
    let ext = normalize(
        &json!({
            "name": "Open edX Mobile App",
            "slug": "mobile-app",
            "provider_id": "opencraft",
            "description_short": "Native mobile apps maintained by Raccoon Gang",
            "repo_url": "https://github.com/raccoongang/mobile"
        }),
        0,
    );

    assert_eq!(classify(&ext), "raccoon-gang");
}

#[test]
fn test_official_name_without_raccoon_is_official() {
    let ext = normalize(
        &json!({"name": "Open edX Mobile App", "provider_id": "x"}),
        0,
    );
    assert_eq!(classify(&ext), "open-edx-axim");
}

#[test]
fn test_official_repo_wins_even_with_raccoon_text() {
    // First-match-wins: the repo condition of the earlier rule matches.
    let s = ContentSignals::new(
        "Mobile App",
        "raccoon gang",
        "",
        "",
        "https://github.com/openedx/openedx-app-ios",
        &[],
    );
    assert_eq!(classify_signals(&s), "open-edx-axim");
}

#[test]
fn test_no_signals_yields_unknown() {
    let s = ContentSignals::new("Gradebook Export", "Export grades to CSV", "", "", "", &[]);
    assert_eq!(classify_signals(&s), "unknown");
}

#[test]
fn test_empty_record_yields_unknown() {
    assert_eq!(classify_signals(&ContentSignals::default()), "unknown");
}

#[rstest]
#[case("", "", "https://cdn.raccoongang.com/shot.png", "raccoon-gang")]
#[case("", "", "https://x.rocketcdn.me/a.png", "raccoon-gang")]
#[case("", "https://overhang.io/tutor/plugins", "", "overhang-io")]
#[case("packaged by overhang.io", "", "", "overhang-io")]
#[case("", "https://github.com/open-craft/xblock-poll", "", "opencraft")]
#[case("", "", "https://edunext.co/img.png", "edunext")]
#[case("hosted by appsembler", "", "", "appsembler")]
#[case("", "https://github.com/edly-io/plugin", "", "edly")]
#[case("hastexo xblock", "", "", "hastexo")]
#[case("from the mit office of distant learning", "", "", "mitxpro")]
#[case("stanford lagunita", "", "", "stanford-online")]
#[case("teams integration by microsoft", "", "", "microsoft")]
#[case("google drive embed", "", "", "google")]
#[case("intelliboard reports", "", "", "intelliboard")]
#[case("proversity tools", "", "", "proversity")]
#[case("harvard xblock", "", "", "harvard")]
#[case("runs on fun-mooc", "", "", "openfun")]
fn test_each_rule_detects(
    #[case] text: &str,
    #[case] repo: &str,
    #[case] screenshot: &str,
    #[case] expected: &str,
) {
    let shots: Vec<String> = if screenshot.is_empty() {
        vec![]
    } else {
        vec![screenshot.to_string()]
    };
    let s = ContentSignals::new("Widget", text, "", "", repo, &shots);
    assert_eq!(classify_signals(&s), expected);
}

#[test]
fn test_earlier_rule_breaks_ties() {
    // Matches both edly and google; edly comes first in the table.
    let s = ContentSignals::new("Widget", "edly google sync", "", "", "", &[]);
    assert_eq!(classify_signals(&s), "edly");
}

#[test]
fn test_rule_table_order() {
    let ids: Vec<_> = DETECTION_RULES.iter().map(|r| r.provider_id).collect();
    assert_eq!(ids[0], "open-edx-axim");
    assert_eq!(ids[1], "raccoon-gang");
    assert_eq!(ids.last(), Some(&"openfun"));
    assert_eq!(ids.len(), 16);
}

#[test]
fn test_cairn_name_detects_overhang() {
    let s = ContentSignals::new("Cairn", "analytics stack", "", "", "", &[]);
    assert_eq!(classify_signals(&s), "overhang-io");
}
