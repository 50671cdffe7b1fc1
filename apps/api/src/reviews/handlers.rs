use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::review::NormalizedReview;
use crate::reviews::filter::{run_pipeline, ReviewFilter};
use crate::reviews::query::ReviewQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ReviewListResponse {
    pub status: &'static str,
    pub result: Vec<NormalizedReview>,
}

/// GET /api/reviews (also served at /api/reviews/hostaway)
pub async fn handle_list_reviews(
    State(state): State<AppState>,
    query: Result<Query<ReviewQuery>, QueryRejection>,
) -> Result<Json<ReviewListResponse>, AppError> {
    let Query(query) = query?;
    let filter = ReviewFilter::try_from(query)?;

    let raw = state.review_source.fetch_reviews().await?;

    let selected = if filter.selected_only {
        Some(state.selections.selected_ids().await?)
    } else {
        None
    };

    let result = run_pipeline(raw, &filter, selected.as_ref());
    debug!("Review list: {} reviews after filtering", result.len());

    Ok(Json(ReviewListResponse {
        status: "success",
        result,
    }))
}
