//! Attendance record entity model.
//!
//! Rows are append-only: there is no update DTO because a submitted
//! record is immutable.

use presensi_core::domain::{AttendanceRecord, UserType};
use presensi_core::error::CoreError;
use presensi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row of the `attendance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecordRow {
    pub id: DbId,
    pub tipe_user: String,
    pub nip: Option<String>,
    pub nama: String,
    pub unit_kerja: Option<String>,
    pub instansi: Option<String>,
    pub nomor_kontak: Option<String>,
    pub email: Option<String>,
    pub orang_dituju: Option<String>,
    pub tujuan: Option<String>,
    pub kegiatan: String,
    pub tanda_tangan: Option<String>,
    pub waktu_presensi: Timestamp,
}

impl TryFrom<AttendanceRecordRow> for AttendanceRecord {
    type Error = CoreError;

    fn try_from(row: AttendanceRecordRow) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord {
            id: row.id,
            tipe_user: UserType::from_str_db(&row.tipe_user)?,
            nip: row.nip,
            nama: row.nama,
            unit_kerja: row.unit_kerja,
            instansi: row.instansi,
            nomor_kontak: row.nomor_kontak,
            email: row.email,
            orang_dituju: row.orang_dituju,
            tujuan: row.tujuan,
            kegiatan: row.kegiatan,
            tanda_tangan: row.tanda_tangan,
            waktu_presensi: row.waktu_presensi,
        })
    }
}
