//! Review source: the single point of entry for fetching guest reviews from the
//! channel manager (Hostaway).
//!
//! No other module may call the review-source API directly. Handlers go through the
//! `ReviewSource` trait carried in `AppState`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::review::RawReview;

const ACCOUNT_ID_HEADER: &str = "Account-ID";

#[derive(Debug, Error)]
pub enum ReviewSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Review source returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode review source response: {0}")]
    Decode(String),
}

/// Upstream envelope. A missing or null `result` is an empty list.
#[derive(Debug, Deserialize)]
struct ReviewListResponse {
    #[serde(default)]
    result: Option<Vec<RawReview>>,
}

/// Anything that can produce the current list of raw reviews.
///
/// Carried in `AppState` as `Arc<dyn ReviewSource>`.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_reviews(&self) -> Result<Vec<RawReview>, ReviewSourceError>;
}

/// Hostaway review API client. One GET per call, no retries.
#[derive(Clone)]
pub struct HostawayClient {
    client: Client,
    url: String,
    account_id: String,
    api_key: String,
}

impl HostawayClient {
    pub fn new(
        url: String,
        account_id: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ReviewSourceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
            account_id,
            api_key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ReviewSourceError> {
        Self::new(
            config.hostaway_api_url.clone(),
            config.hostaway_account_id.clone(),
            config.hostaway_api_key.clone(),
            Duration::from_secs(config.review_source_timeout_secs),
        )
    }
}

#[async_trait]
impl ReviewSource for HostawayClient {
    async fn fetch_reviews(&self) -> Result<Vec<RawReview>, ReviewSourceError> {
        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.api_key)
            .header(ACCOUNT_ID_HEADER, &self.account_id)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to read review source error body (status {status}): {e}");
                    String::new()
                }
            };
            return Err(ReviewSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let reviews = parse_review_list(&body)?;
        debug!("Fetched {} reviews from review source", reviews.len());
        Ok(reviews)
    }
}

fn parse_review_list(body: &str) -> Result<Vec<RawReview>, ReviewSourceError> {
    let parsed: ReviewListResponse =
        serde_json::from_str(body).map_err(|e| ReviewSourceError::Decode(e.to_string()))?;
    Ok(parsed.result.unwrap_or_default())
}

/// Fixed in-memory source for handler tests.
#[cfg(test)]
pub struct StaticReviewSource(pub Vec<RawReview>);

#[cfg(test)]
#[async_trait]
impl ReviewSource for StaticReviewSource {
    async fn fetch_reviews(&self) -> Result<Vec<RawReview>, ReviewSourceError> {
        Ok(self.0.clone())
    }
}

/// Source that always fails the way an unreachable or unauthorized upstream does.
#[cfg(test)]
pub struct FailingReviewSource;

#[cfg(test)]
#[async_trait]
impl ReviewSource for FailingReviewSource {
    async fn fetch_reviews(&self) -> Result<Vec<RawReview>, ReviewSourceError> {
        Err(ReviewSourceError::Status {
            status: 403,
            body: "invalid account".into(),
        })
    }
}
