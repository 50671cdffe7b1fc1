use serde::Deserialize;

use crate::errors::AppError;
use crate::reviews::filter::ReviewFilter;
use crate::reviews::normalize::parse_timestamp;

/// Raw query string of `GET /api/reviews`. Every field arrives as text so that
/// bad input is reported as a 400 with our own message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub rating: Option<String>,
    pub category: Option<String>,
    pub channel: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub selected_only: Option<String>,
}

impl TryFrom<ReviewQuery> for ReviewFilter {
    type Error = AppError;

    fn try_from(query: ReviewQuery) -> Result<Self, Self::Error> {
        let rating = present(query.rating)
            .map(|raw| parse_rating(&raw))
            .transpose()?;
        let from = present(query.from)
            .map(|raw| parse_bound("from", &raw))
            .transpose()?;
        let to = present(query.to)
            .map(|raw| parse_bound("to", &raw))
            .transpose()?;

        let selected_only = match present(query.selected_only) {
            None => false,
            Some(raw) if raw.eq_ignore_ascii_case("true") => true,
            Some(raw) if raw.eq_ignore_ascii_case("false") => false,
            Some(raw) => {
                return Err(AppError::Validation(format!(
                    "selectedOnly must be 'true' or 'false', got '{raw}'"
                )));
            }
        };

        Ok(ReviewFilter {
            rating,
            category: present(query.category),
            channel: present(query.channel),
            from,
            to,
            selected_only,
        })
    }
}

// The dashboard sends every filter key, with empty values for unused ones.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_rating(raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AppError::Validation(format!("rating must be a number, got '{raw}'")))
}

fn parse_bound(name: &str, raw: &str) -> Result<chrono::DateTime<chrono::Utc>, AppError> {
    parse_timestamp(raw)
        .ok_or_else(|| AppError::Validation(format!("'{name}' is not a valid date: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn query(pairs: &[(&str, &str)]) -> ReviewQuery {
        let mut q = ReviewQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "rating" => q.rating = value,
                "category" => q.category = value,
                "channel" => q.channel = value,
                "from" => q.from = value,
                "to" => q.to = value,
                "selectedOnly" => q.selected_only = value,
                other => panic!("unknown key {other}"),
            }
        }
        q
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let filter = ReviewFilter::try_from(query(&[
            ("rating", ""),
            ("category", ""),
            ("channel", " "),
            ("from", ""),
            ("to", ""),
            ("selectedOnly", ""),
        ]))
        .unwrap();
        assert_eq!(filter, ReviewFilter::default());
    }

    #[test]
    fn test_full_query_parses() {
        let filter = ReviewFilter::try_from(query(&[
            ("rating", "10"),
            ("category", "cleanliness"),
            ("channel", "host-to-guest"),
            ("from", "2020-01-01"),
            ("to", "2021-01-01"),
            ("selectedOnly", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(filter.rating, Some(10.0));
        assert_eq!(filter.category.as_deref(), Some("cleanliness"));
        assert_eq!(filter.from, Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(filter.to, Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap()));
        assert!(filter.selected_only);
    }

    #[test]
    fn test_rejects_non_numeric_rating() {
        let err = ReviewFilter::try_from(query(&[("rating", "ten")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = ReviewFilter::try_from(query(&[("rating", "NaN")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_bad_dates() {
        let err = ReviewFilter::try_from(query(&[("from", "someday")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = ReviewFilter::try_from(query(&[("to", "2020-02-30")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_inverted_range_is_accepted() {
        let filter =
            ReviewFilter::try_from(query(&[("from", "2021-01-01"), ("to", "2020-01-01")]))
                .unwrap();
        assert!(filter.from > filter.to);
    }

    #[test]
    fn test_selected_only_values() {
        let filter = ReviewFilter::try_from(query(&[("selectedOnly", "false")])).unwrap();
        assert!(!filter.selected_only);

        let err = ReviewFilter::try_from(query(&[("selectedOnly", "yes")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
