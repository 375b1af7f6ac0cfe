//! Handlers for attendance records.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use presensi_core::domain::{CreateAttendanceRecord, UserType};
use presensi_core::error::CoreError;
use presensi_core::validation::{validate_contact, validate_email};
use presensi_db::repositories::attendance_record_repo::AttendanceRecordRepo;
use presensi_db::repositories::employee_repo::EmployeeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/records
///
/// List all submissions, newest first.
pub async fn list_records(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = AttendanceRecordRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// POST /api/v1/records
///
/// Persist a finished submission. The wizard validates before sending,
/// but the server re-checks: required fields and contact/email formats
/// are enforced here with the same user-facing messages, so a bypassed
/// client gets the identical 400 body.
pub async fn create_record(
    State(state): State<AppState>,
    Json(input): Json<CreateAttendanceRecord>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let row = AttendanceRecordRepo::insert(&state.pool, &input).await?;
    tracing::info!(
        id = row.id,
        tipe_user = %row.tipe_user,
        kegiatan = %row.kegiatan,
        "Attendance record created",
    );

    // Internal submissions carrying a contact number sync it back to
    // the directory. Best-effort: the record is already persisted, so
    // a sync failure must not fail the request.
    if input.tipe_user == UserType::Internal {
        if let (Some(nip), Some(kontak)) = (&input.nip, &input.nomor_kontak) {
            match EmployeeRepo::update_contact(&state.pool, nip, kontak).await {
                Ok(Some(_)) => {
                    tracing::info!(nip = %nip, "Employee contact synced from submission");
                }
                Ok(None) => {
                    tracing::warn!(nip = %nip, "Contact sync skipped, NIP not in directory");
                }
                Err(err) => {
                    tracing::warn!(nip = %nip, error = %err, "Contact sync failed");
                }
            }
        }
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

fn validate_input(input: &CreateAttendanceRecord) -> Result<(), CoreError> {
    if input.nama.trim().is_empty() {
        return Err(CoreError::Validation("Nama wajib diisi.".to_string()));
    }
    if input.kegiatan.trim().is_empty() {
        return Err(CoreError::Validation("Kegiatan wajib diisi.".to_string()));
    }
    if let Some(kontak) = &input.nomor_kontak {
        if let Some(hint) = validate_contact(kontak) {
            return Err(CoreError::Validation(hint.to_string()));
        }
    }
    if let Some(email) = &input.email {
        if let Some(hint) = validate_email(email) {
            return Err(CoreError::Validation(hint.to_string()));
        }
    }
    Ok(())
}
