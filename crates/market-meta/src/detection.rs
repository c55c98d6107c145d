//! Content-based provider detection
//!
//! Fallback used when a record's provider id is `"unknown"`: the
//! extension's descriptive text, repository URL and screenshot URLs are
//! matched against an ordered rule table. The first rule with any
//! satisfied condition wins; there is no scoring. Rule order therefore
//! carries meaning, since later rules overlap earlier ones.

use crate::UNKNOWN_PROVIDER_ID;
use crate::schema::Extension;

/// Lowercased text views of an extension used by the detection rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSignals {
    /// Short description, long description, install notes and name,
    /// space-joined
    pub all_text: String,
    pub repo_url: String,
    /// Screenshot URLs, space-joined
    pub screenshot_urls: String,
    pub name: String,
}

impl ContentSignals {
    pub fn new(
        name: &str,
        description_short: &str,
        description_long: &str,
        install_notes: &str,
        repo_url: &str,
        screenshots: &[String],
    ) -> Self {
        Self {
            all_text: [description_short, description_long, install_notes, name]
                .join(" ")
                .to_lowercase(),
            repo_url: repo_url.to_lowercase(),
            screenshot_urls: screenshots.join(" ").to_lowercase(),
            name: name.to_lowercase(),
        }
    }
}

impl From<&Extension> for ContentSignals {
    fn from(ext: &Extension) -> Self {
        Self::new(
            &ext.name,
            &ext.description_short,
            &ext.description_long,
            &ext.install_notes,
            &ext.repo_url,
            &ext.screenshots,
        )
    }
}

/// A predicate over [`ContentSignals`].
///
/// All needles are lowercase.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    TextContains(&'static str),
    RepoContains(&'static str),
    ScreenshotsContain(&'static str),
    NameContains(&'static str),
    NameStartsWith(&'static str),
    TextLacks(&'static str),
    AllOf(&'static [Condition]),
    AnyOf(&'static [Condition]),
}

impl Condition {
    pub fn matches(&self, signals: &ContentSignals) -> bool {
        match self {
            Self::TextContains(needle) => signals.all_text.contains(needle),
            Self::RepoContains(needle) => signals.repo_url.contains(needle),
            Self::ScreenshotsContain(needle) => signals.screenshot_urls.contains(needle),
            Self::NameContains(needle) => signals.name.contains(needle),
            Self::NameStartsWith(prefix) => signals.name.starts_with(prefix),
            Self::TextLacks(needle) => !signals.all_text.contains(needle),
            Self::AllOf(conditions) => conditions.iter().all(|c| c.matches(signals)),
            Self::AnyOf(conditions) => conditions.iter().any(|c| c.matches(signals)),
        }
    }
}

/// One provider's detection conditions. Conditions are OR'd.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub provider_id: &'static str,
    pub conditions: &'static [Condition],
}

impl DetectionRule {
    pub fn matches(&self, signals: &ContentSignals) -> bool {
        self.conditions.iter().any(|c| c.matches(signals))
    }
}

use Condition::{
    AllOf, AnyOf, NameContains, NameStartsWith, RepoContains, ScreenshotsContain, TextContains,
    TextLacks,
};

/// Detection rules in precedence order.
///
/// The official-organization rule comes first but its name condition is
/// guarded so records mentioning "raccoon" fall through to Raccoon Gang.
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        provider_id: "open-edx-axim",
        conditions: &[
            RepoContains("github.com/openedx/"),
            AllOf(&[
                TextContains("official"),
                AnyOf(&[TextContains("open edx"), TextContains("openedx")]),
            ]),
            AllOf(&[NameContains("open edx"), TextLacks("raccoon")]),
            TextContains("axim collaborative"),
            RepoContains("openedx.org"),
        ],
    },
    DetectionRule {
        provider_id: "raccoon-gang",
        conditions: &[
            AnyOf(&[TextContains("raccoon gang"), TextContains("raccoong")]),
            AnyOf(&[
                ScreenshotsContain("raccoongang"),
                ScreenshotsContain("rocketcdn.me"),
            ]),
            AllOf(&[NameContains("mobile app"), TextContains("raccoon")]),
        ],
    },
    DetectionRule {
        provider_id: "overhang-io",
        conditions: &[
            RepoContains("overhang.io"),
            ScreenshotsContain("overhang.io"),
            TextContains("overhang.io"),
            NameContains("cairn"),
        ],
    },
    DetectionRule {
        provider_id: "opencraft",
        conditions: &[
            AnyOf(&[RepoContains("open-craft"), RepoContains("opencraft")]),
            ScreenshotsContain("open-craft"),
            AnyOf(&[TextContains("opencraft"), TextContains("open-craft")]),
        ],
    },
    DetectionRule {
        provider_id: "edunext",
        conditions: &[
            AnyOf(&[TextContains("edunext"), TextContains("edu next")]),
            ScreenshotsContain("edunext.co"),
            NameStartsWith("eox"),
        ],
    },
    DetectionRule {
        provider_id: "appsembler",
        conditions: &[
            TextContains("appsembler"),
            RepoContains("appsembler"),
            ScreenshotsContain("appsembler"),
        ],
    },
    DetectionRule {
        provider_id: "edly",
        conditions: &[TextContains("edly"), RepoContains("edly")],
    },
    DetectionRule {
        provider_id: "hastexo",
        conditions: &[TextContains("hastexo"), RepoContains("hastexo")],
    },
    DetectionRule {
        provider_id: "mitxpro",
        conditions: &[
            AnyOf(&[TextContains("mit xpro"), TextContains("mitxpro")]),
            TextContains("mit office of distant learning"),
        ],
    },
    DetectionRule {
        provider_id: "stanford-online",
        conditions: &[TextContains("stanford")],
    },
    DetectionRule {
        provider_id: "microsoft",
        conditions: &[TextContains("microsoft")],
    },
    DetectionRule {
        provider_id: "google",
        conditions: &[TextContains("google")],
    },
    DetectionRule {
        provider_id: "intelliboard",
        conditions: &[TextContains("intelliboard")],
    },
    DetectionRule {
        provider_id: "proversity",
        conditions: &[TextContains("proversity")],
    },
    DetectionRule {
        provider_id: "harvard",
        conditions: &[TextContains("harvard")],
    },
    DetectionRule {
        provider_id: "openfun",
        conditions: &[TextContains("openfun"), TextContains("fun-mooc")],
    },
];

/// Infer a provider id from extension content.
///
/// Returns the id of the first matching rule in [`DETECTION_RULES`], or
/// `"unknown"`. Heuristic only: false positives and negatives are expected.
pub fn classify(ext: &Extension) -> &'static str {
    classify_signals(&ContentSignals::from(ext))
}

/// Rule evaluation over precomputed signals.
pub fn classify_signals(signals: &ContentSignals) -> &'static str {
    DETECTION_RULES
        .iter()
        .find(|rule| rule.matches(signals))
        .map_or(UNKNOWN_PROVIDER_ID, |rule| rule.provider_id)
}
