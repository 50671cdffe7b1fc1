use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::review::{NormalizedReview, RawReview};
use crate::reviews::normalize::normalize_reviews;

/// Optional conditions for the review list. Unset fields impose no constraint;
/// set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    /// Exact match on the overall rating or any category rating.
    pub rating: Option<f64>,
    /// Exact, case-sensitive match on any category name.
    pub category: Option<String>,
    /// Exact match on the review `type`.
    pub channel: Option<String>,
    /// Inclusive lower bound on `submittedAt`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `submittedAt`.
    pub to: Option<DateTime<Utc>>,
    pub selected_only: bool,
}

impl ReviewFilter {
    pub fn matches(&self, review: &NormalizedReview) -> bool {
        self.matches_rating(review)
            && self.matches_category(review)
            && self.matches_channel(review)
            && self.matches_date_range(review)
    }

    fn matches_rating(&self, review: &NormalizedReview) -> bool {
        let Some(wanted) = self.rating else {
            return true;
        };
        review.rating == Some(wanted)
            || review
                .review_category
                .iter()
                .any(|c| c.rating == Some(wanted))
    }

    fn matches_category(&self, review: &NormalizedReview) -> bool {
        match &self.category {
            Some(wanted) => review.review_category.iter().any(|c| &c.category == wanted),
            None => true,
        }
    }

    fn matches_channel(&self, review: &NormalizedReview) -> bool {
        match &self.channel {
            Some(wanted) => &review.review_type == wanted,
            None => true,
        }
    }

    // A review without a parseable timestamp fails any bound that is set.
    fn matches_date_range(&self, review: &NormalizedReview) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(submitted_at) = review.submitted_at else {
            return false;
        };
        self.from.map_or(true, |from| submitted_at >= from)
            && self.to.map_or(true, |to| submitted_at <= to)
    }
}

/// Keeps only reviews whose id is in `selected`. Ids in `selected` that no longer
/// exist upstream are ignored.
pub fn restrict_to_selected(
    reviews: Vec<NormalizedReview>,
    selected: &HashSet<i64>,
) -> Vec<NormalizedReview> {
    reviews
        .into_iter()
        .filter(|r| selected.contains(&r.id))
        .collect()
}

pub fn apply_filters(reviews: Vec<NormalizedReview>, filter: &ReviewFilter) -> Vec<NormalizedReview> {
    reviews.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Normalize, intersect with the selection set (when given), then filter.
/// Upstream order is preserved.
pub fn run_pipeline(
    raw: Vec<RawReview>,
    filter: &ReviewFilter,
    selected: Option<&HashSet<i64>>,
) -> Vec<NormalizedReview> {
    let mut reviews = normalize_reviews(raw);
    if let Some(selected) = selected {
        reviews = restrict_to_selected(reviews, selected);
    }
    apply_filters(reviews, filter)
}
