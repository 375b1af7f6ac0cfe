//! Activity catalog entity model and DTOs.

use presensi_core::domain::{Activity, ActivityMode};
use presensi_core::error::CoreError;
use presensi_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `activities` table. `tipe_kegiatan` is constrained to
/// the known modes by a CHECK constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityRow {
    pub id: DbId,
    pub nama_kegiatan: String,
    pub tipe_kegiatan: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = CoreError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: row.id,
            nama_kegiatan: row.nama_kegiatan,
            tipe_kegiatan: ActivityMode::from_str_db(&row.tipe_kegiatan)?,
        })
    }
}

/// DTO for creating an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub nama_kegiatan: String,
    pub tipe_kegiatan: ActivityMode,
    pub is_active: Option<bool>,
}

/// DTO for patching an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateActivity {
    pub nama_kegiatan: Option<String>,
    pub tipe_kegiatan: Option<ActivityMode>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(tipe: &str) -> ActivityRow {
        ActivityRow {
            id: 7,
            nama_kegiatan: "Rapat Koordinasi".into(),
            tipe_kegiatan: tipe.into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn conversion_parses_the_mode() {
        let activity = Activity::try_from(row("Luring")).unwrap();
        assert_eq!(activity.tipe_kegiatan, ActivityMode::Luring);
    }

    #[test]
    fn conversion_rejects_an_unknown_mode() {
        assert!(Activity::try_from(row("Hybrid")).is_err());
    }
}
