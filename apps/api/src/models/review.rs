use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One per-category sub-rating. Category names may repeat within a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A review exactly as the review source returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub id: i64,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub review_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub public_review: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_category: Vec<ReviewCategory>,
    #[serde(default)]
    pub submitted_at: Option<String>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub listing_name: Option<String>,
}

/// A review with `submittedAt` parsed. Recomputed on every request, never stored.
///
/// `submitted_at` is `None` when the upstream timestamp was missing or malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: Option<String>,
    pub rating: Option<f64>,
    pub public_review: Option<String>,
    pub review_category: Vec<ReviewCategory>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub guest_name: Option<String>,
    pub listing_name: Option<String>,
}

// Upstream sends `null` for some fields it otherwise fills in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_review_parses_upstream_shape() {
        let raw: RawReview = serde_json::from_value(json!({
            "id": 7453,
            "type": "host-to-guest",
            "status": "published",
            "rating": null,
            "publicReview": "Would host again",
            "reviewCategory": [{ "category": "cleanliness", "rating": 10 }],
            "submittedAt": "2020-08-21 22:45:14",
            "guestName": "Shane Finkelstein",
            "listingName": "2B N1 A - 29 Shoreditch Heights"
        }))
        .unwrap();

        assert_eq!(raw.id, 7453);
        assert_eq!(raw.review_type, "host-to-guest");
        assert_eq!(raw.rating, None);
        assert_eq!(raw.review_category[0].rating, Some(10.0));
        assert_eq!(raw.submitted_at.as_deref(), Some("2020-08-21 22:45:14"));
    }

    #[test]
    fn test_raw_review_tolerates_missing_and_null_fields() {
        let raw: RawReview =
            serde_json::from_value(json!({ "id": 1, "reviewCategory": null })).unwrap();
        assert!(raw.review_category.is_empty());
        assert!(raw.public_review.is_none());
        assert_eq!(raw.review_type, "");
    }

    #[test]
    fn test_raw_review_tolerates_null_type_and_category() {
        let raw: RawReview = serde_json::from_value(json!({
            "id": 2,
            "type": null,
            "reviewCategory": [{ "category": null, "rating": 10 }]
        }))
        .unwrap();
        assert_eq!(raw.review_type, "");
        assert_eq!(raw.review_category[0].category, "");
        assert_eq!(raw.review_category[0].rating, Some(10.0));
    }

    #[test]
    fn test_normalized_review_serializes_camel_case() {
        let review = NormalizedReview {
            id: 2,
            review_type: "guest-to-host".into(),
            status: Some("published".into()),
            rating: Some(9.0),
            public_review: None,
            review_category: vec![],
            submitted_at: None,
            guest_name: None,
            listing_name: Some("Flat".into()),
        };
        let value = serde_json::to_value(&review).unwrap();
        assert_eq!(value["type"], "guest-to-host");
        assert_eq!(value["listingName"], "Flat");
        assert!(value["submittedAt"].is_null());
        assert!(value.get("review_type").is_none());
    }
}
