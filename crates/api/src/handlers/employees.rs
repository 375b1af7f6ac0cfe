//! Handlers for the employee directory.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use presensi_core::domain::Employee;
use presensi_core::error::CoreError;
use presensi_db::repositories::employee_repo::EmployeeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/employees/{nip}
///
/// Look up a directory entry by NIP. Returns 404 with the user-facing
/// message when no entry matches; the kiosk shows that message verbatim.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(nip): Path<String>,
) -> AppResult<impl IntoResponse> {
    let row = EmployeeRepo::find_by_nip(&state.pool, &nip)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Pegawai",
            key: nip,
        })?;

    Ok(Json(DataResponse {
        data: Employee::from(row),
    }))
}
