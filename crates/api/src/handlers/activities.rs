//! Handlers for the activity catalog.
//!
//! The check-in wizard only ever lists with `?active=true`; the
//! remaining CRUD endpoints serve catalog administration.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use presensi_core::error::CoreError;
use presensi_core::types::DbId;
use presensi_db::models::activity::{CreateActivity, UpdateActivity};
use presensi_db::repositories::activity_repo::ActivityRepo;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListActivitiesQuery {
    /// Restrict the list to activities the wizard may offer.
    pub active: Option<bool>,
}

/// GET /api/v1/activities
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ListActivitiesQuery>,
) -> AppResult<impl IntoResponse> {
    let rows = ActivityRepo::list(&state.pool, query.active.unwrap_or(false)).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/activities/{id}
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = ActivityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Kegiatan",
            key: id.to_string(),
        })?;
    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/activities
pub async fn create_activity(
    State(state): State<AppState>,
    Json(input): Json<CreateActivity>,
) -> AppResult<impl IntoResponse> {
    if input.nama_kegiatan.trim().is_empty() {
        return Err(CoreError::Validation("Nama kegiatan wajib diisi.".to_string()).into());
    }

    let row = ActivityRepo::create(&state.pool, &input).await?;
    tracing::info!(id = row.id, nama = %row.nama_kegiatan, "Activity created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: row })))
}

/// PUT /api/v1/activities/{id}
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivity>,
) -> AppResult<impl IntoResponse> {
    if let Some(nama) = &input.nama_kegiatan {
        if nama.trim().is_empty() {
            return Err(CoreError::Validation("Nama kegiatan wajib diisi.".to_string()).into());
        }
    }

    let row = ActivityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Kegiatan",
            key: id.to_string(),
        })?;

    Ok(Json(DataResponse { data: row }))
}

/// DELETE /api/v1/activities/{id}
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ActivityRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Kegiatan",
            key: id.to_string(),
        }
        .into());
    }

    tracing::info!(id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
