//! Repository for the `activities` catalog table.

use presensi_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{ActivityRow, CreateActivity, UpdateActivity};

/// Column list for `activities` queries.
const COLUMNS: &str = "\
    id, nama_kegiatan, tipe_kegiatan, is_active, \
    created_at, updated_at";

/// Provides data access for the activity catalog.
pub struct ActivityRepo;

impl ActivityRepo {
    /// List activities sorted by name. With `active_only` the list is
    /// restricted to what the check-in wizard may offer.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<ActivityRow>, sqlx::Error> {
        let query = if active_only {
            format!(
                "SELECT {COLUMNS} FROM activities WHERE is_active = TRUE \
                 ORDER BY nama_kegiatan"
            )
        } else {
            format!("SELECT {COLUMNS} FROM activities ORDER BY nama_kegiatan")
        };
        sqlx::query_as::<_, ActivityRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1");
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateActivity) -> Result<ActivityRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (nama_kegiatan, tipe_kegiatan, is_active) \
             VALUES ($1, $2, COALESCE($3, TRUE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(&dto.nama_kegiatan)
            .bind(dto.tipe_kegiatan.as_str())
            .bind(dto.is_active)
            .fetch_one(pool)
            .await
    }

    /// Patch an activity; absent fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateActivity,
    ) -> Result<Option<ActivityRow>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET \
                 nama_kegiatan = COALESCE($2, nama_kegiatan), \
                 tipe_kegiatan = COALESCE($3, tipe_kegiatan), \
                 is_active = COALESCE($4, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRow>(&query)
            .bind(id)
            .bind(&dto.nama_kegiatan)
            .bind(dto.tipe_kegiatan.map(|m| m.as_str()))
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete an activity. Returns `false` when the id matched nothing.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
