//! Review records and rating statistics
//!
//! Reviews live in a hosted backend; this module only consumes exported
//! review records, aggregates them per extension and overlays the result
//! onto catalog entries.

use std::collections::HashMap;
use std::path::Path;

use market_fs::JsonStore;
use serde::{Deserialize, Serialize};

use crate::join::JoinedExtension;
use crate::{Error, Result};

/// Lowest accepted star rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: u8 = 5;

/// One user review of an extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Review {
    pub extension_slug: String,
    /// URL of the reviewer's platform instance
    pub openedx_url: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Review {
    pub fn new(
        extension_slug: impl Into<String>,
        openedx_url: impl Into<String>,
        rating: u8,
        comment: Option<String>,
    ) -> Self {
        Self {
            extension_slug: extension_slug.into(),
            openedx_url: openedx_url.into(),
            rating,
            // Blank comments are stored as absent
            comment: comment.filter(|c| !c.trim().is_empty()),
        }
    }

    /// Check a review before it is submitted.
    pub fn validate(&self) -> Result<()> {
        if self.extension_slug.trim().is_empty() {
            return Err(Error::InvalidReview {
                reason: "extension slug is required".to_string(),
            });
        }
        if self.openedx_url.trim().is_empty() {
            return Err(Error::InvalidReview {
                reason: "the Open edX URL is required".to_string(),
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidReview {
                reason: format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}, got {}",
                    self.rating
                ),
            });
        }
        Ok(())
    }
}

/// Aggregated rating of one extension.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExtensionStats {
    /// Mean rating rounded to one decimal
    pub average_rating: f64,
    pub review_count: u64,
}

impl ExtensionStats {
    fn from_ratings(total: u64, count: u64) -> Self {
        if count == 0 {
            return Self::default();
        }
        let mean = total as f64 / count as f64;
        Self {
            average_rating: (mean * 10.0).round() / 10.0,
            review_count: count,
        }
    }
}

/// Stats for one slug. Zero when it has no reviews.
pub fn stats_for(slug: &str, reviews: &[Review]) -> ExtensionStats {
    let (total, count) = reviews
        .iter()
        .filter(|r| r.extension_slug == slug)
        .fold((0u64, 0u64), |(total, count), r| {
            (total + u64::from(r.rating), count + 1)
        });
    ExtensionStats::from_ratings(total, count)
}

/// Stats for every slug that has at least one review.
pub fn stats_by_slug(reviews: &[Review]) -> HashMap<String, ExtensionStats> {
    let mut sums: HashMap<&str, (u64, u64)> = HashMap::new();
    for review in reviews {
        let entry = sums.entry(review.extension_slug.as_str()).or_default();
        entry.0 += u64::from(review.rating);
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(slug, (total, count))| {
            (slug.to_string(), ExtensionStats::from_ratings(total, count))
        })
        .collect()
}

/// Overwrite `rating_avg` / `rating_count` of reviewed extensions.
///
/// Extensions without reviews keep their registry values.
pub fn apply_stats(items: &mut [JoinedExtension], stats: &HashMap<String, ExtensionStats>) {
    for item in items {
        if let Some(s) = stats.get(&item.extension.slug) {
            item.extension.rating_avg = Some(s.average_rating);
            item.extension.rating_count = Some(s.review_count);
        }
    }
}

/// Read an exported JSON array of reviews.
///
/// Records failing [`Review::validate`] are skipped with a warning so they
/// never reach the aggregates.
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let records: Vec<Review> = JsonStore::new().load(path).map_err(Error::Reviews)?;
    let total = records.len();

    let reviews: Vec<Review> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, review)| match review.validate() {
            Ok(()) => Some(review),
            Err(e) => {
                tracing::warn!("Skipping review {} in {}: {}", index, path.display(), e);
                None
            }
        })
        .collect();

    tracing::debug!(
        "Loaded {} of {} reviews from {}",
        reviews.len(),
        total,
        path.display()
    );
    Ok(reviews)
}
