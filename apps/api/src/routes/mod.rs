pub mod health;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::reviews::handlers as reviews;
use crate::selection::handlers as selection;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/reviews", get(reviews::handle_list_reviews))
        .route("/api/reviews/hostaway", get(reviews::handle_list_reviews))
        .route(
            "/api/reviews/selection",
            get(selection::handle_list_selections).post(selection::handle_select),
        )
        .route(
            "/api/reviews/selection/:review_id",
            delete(selection::handle_unselect),
        )
        .with_state(state)
}
