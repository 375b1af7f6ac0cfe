//! Route definitions for attendance records.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Record routes mounted at `/records`.
///
/// ```text
/// GET  / -> list_records
/// POST / -> create_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(records::list_records).post(records::create_record))
}
