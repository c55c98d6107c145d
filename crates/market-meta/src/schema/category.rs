use serde::{Deserialize, Serialize};

/// Extension category.
///
/// Only these four values are canonical. Records carrying anything else,
/// including the [`LegacyCategory`] values, are normalized to the first
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Self-hosted module that becomes part of the platform installation
    #[default]
    PlatformNative,
    /// Platform-level connector to an externally hosted service
    PlatformConnector,
    /// Courseware block that runs on the platform servers
    CoursewareNative,
    /// Courseware connector launching a third-party tool (LTI or API)
    CoursewareConnector,
}

impl Category {
    /// All canonical categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::PlatformNative,
        Category::PlatformConnector,
        Category::CoursewareNative,
        Category::CoursewareConnector,
    ];

    /// Parse an exact category string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "platform-native" => Some(Self::PlatformNative),
            "platform-connector" => Some(Self::PlatformConnector),
            "courseware-native" => Some(Self::CoursewareNative),
            "courseware-connector" => Some(Self::CoursewareConnector),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlatformNative => "platform-native",
            Self::PlatformConnector => "platform-connector",
            Self::CoursewareNative => "courseware-native",
            Self::CoursewareConnector => "courseware-connector",
        }
    }

    /// Display label used in listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::PlatformNative => "Platform Module – Native",
            Self::PlatformConnector => "Platform Module – 3rd-Party Integration",
            Self::CoursewareNative => "Courseware Component – Native",
            Self::CoursewareConnector => "Courseware Component – 3rd-Party Integration",
        }
    }

    /// One-paragraph explanation of the category.
    pub fn description(self) -> &'static str {
        match self {
            Self::PlatformNative => {
                "A self-hosted module that becomes a first-class part of your Open edX \
                 installation. No extra subscriptions or outside hosting are needed."
            }
            Self::PlatformConnector => {
                "A connector that wires your Open edX site to an external system running \
                 elsewhere. The external service is licensed separately."
            }
            Self::CoursewareNative => {
                "Interactive blocks that live entirely on your Open edX servers and appear \
                 in Studio like any built-in problem type."
            }
            Self::CoursewareConnector => {
                "Embeds or launches a third-party learning tool inside course units, \
                 typically via LTI 1.3 or a custom API."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category values used by older registry revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyCategory {
    PlatformAddon,
    ExternalTool,
    OperationalService,
}

impl LegacyCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "platform-addon" => Some(Self::PlatformAddon),
            "external-tool" => Some(Self::ExternalTool),
            "operational-service" => Some(Self::OperationalService),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PlatformAddon => "Platform Add-ons",
            Self::ExternalTool => "External Tools (LTI)",
            Self::OperationalService => "Operational Services",
        }
    }
}

/// Pricing model of an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Price {
    #[default]
    Free,
    Paid,
}

impl Price {
    /// Parse an exact `free` / `paid` string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
