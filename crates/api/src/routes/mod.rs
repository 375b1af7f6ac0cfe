pub mod activities;
pub mod employees;
pub mod health;
pub mod records;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /employees/{nip}   directory lookup
///
/// /activities        list, create
/// /activities/{id}   get, update, delete
///
/// /records           list, create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/employees", employees::router())
        .nest("/activities", activities::router())
        .nest("/records", records::router())
}
