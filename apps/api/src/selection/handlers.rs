use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::selection::SelectionRecord;
use crate::selection::store::SelectOutcome;
use crate::state::AppState;

const MISSING_FIELDS: &str = "reviewId and listingName required";

/// Body of `POST /api/reviews/selection`. Fields are loosely typed so that a
/// missing or mistyped value yields the same 400 message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    #[serde(default)]
    pub review_id: Option<Value>,
    #[serde(default)]
    pub listing_name: Option<Value>,
}

impl SelectRequest {
    fn validate(&self) -> Result<(i64, &str), AppError> {
        let review_id = self
            .review_id
            .as_ref()
            .and_then(Value::as_i64)
            .filter(|id| *id > 0);
        let listing_name = self
            .listing_name
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());

        match (review_id, listing_name) {
            (Some(id), Some(name)) => Ok((id, name)),
            _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SelectionListResponse {
    pub status: &'static str,
    pub result: Vec<SelectionRecord>,
}

/// POST /api/reviews/selection
pub async fn handle_select(
    State(state): State<AppState>,
    body: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    // An unreadable body is reported like an empty one.
    let Json(req) = body.map_err(|_| AppError::Validation(MISSING_FIELDS.to_string()))?;
    let (review_id, listing_name) = req.validate()?;

    let (status, message) = match state.selections.select(review_id, listing_name).await? {
        SelectOutcome::Created(_) => (StatusCode::CREATED, "Review marked as selected"),
        SelectOutcome::AlreadySelected => (StatusCode::OK, "Already selected"),
    };

    Ok((
        status,
        Json(MessageResponse {
            status: "success",
            message,
        }),
    ))
}

/// DELETE /api/reviews/selection/:review_id
pub async fn handle_unselect(
    State(state): State<AppState>,
    review_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(review_id) = review_id?;

    state
        .selections
        .unselect(review_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Selected review not found".to_string()))?;

    Ok(Json(MessageResponse {
        status: "success",
        message: "Review unmarked as selected",
    }))
}

/// GET /api/reviews/selection
pub async fn handle_list_selections(
    State(state): State<AppState>,
) -> Result<Json<SelectionListResponse>, AppError> {
    let result = state.selections.list().await?;
    Ok(Json(SelectionListResponse {
        status: "success",
        result,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> SelectRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let req = request(json!({ "reviewId": 1234, "listingName": "Test Listing" }));
        assert_eq!(req.validate().unwrap(), (1234, "Test Listing"));
    }

    #[test]
    fn test_validate_rejects_missing_or_blank_fields() {
        for body in [
            json!({}),
            json!({ "reviewId": 1 }),
            json!({ "listingName": "Test" }),
            json!({ "reviewId": 1, "listingName": "   " }),
            json!({ "reviewId": 0, "listingName": "Test" }),
            json!({ "reviewId": "1", "listingName": "Test" }),
            json!({ "reviewId": 1.5, "listingName": "Test" }),
        ] {
            let err = request(body.clone()).validate().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {body}");
        }
    }
}
