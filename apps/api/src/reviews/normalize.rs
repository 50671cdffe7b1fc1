use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::review::{NormalizedReview, RawReview};

/// Naive formats tried after RFC 3339. All are read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a review-source or query-string timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and a bare
/// `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Converts one raw review. A malformed `submittedAt` becomes `None`; the record is kept.
pub fn normalize_review(raw: RawReview) -> NormalizedReview {
    let submitted_at = raw.submitted_at.as_deref().and_then(parse_timestamp);

    NormalizedReview {
        id: raw.id,
        review_type: raw.review_type,
        status: raw.status,
        rating: raw.rating,
        public_review: raw.public_review,
        review_category: raw.review_category,
        submitted_at,
        guest_name: raw.guest_name,
        listing_name: raw.listing_name,
    }
}

pub fn normalize_reviews(raw: Vec<RawReview>) -> Vec<NormalizedReview> {
    raw.into_iter().map(normalize_review).collect()
}
