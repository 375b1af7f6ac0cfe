//! Route definitions for the employee directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Directory routes mounted at `/employees`.
///
/// ```text
/// GET /{nip} -> get_employee
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{nip}", get(employees::get_employee))
}
