//! Route definitions for the activity catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::activities;
use crate::state::AppState;

/// Catalog routes mounted at `/activities`.
///
/// ```text
/// GET    /      -> list_activities
/// POST   /      -> create_activity
/// GET    /{id}  -> get_activity
/// PUT    /{id}  -> update_activity
/// DELETE /{id}  -> delete_activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(activities::list_activities).post(activities::create_activity),
        )
        .route(
            "/{id}",
            get(activities::get_activity)
                .put(activities::update_activity)
                .delete(activities::delete_activity),
        )
}
