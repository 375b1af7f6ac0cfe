//! Repository for the `attendance_records` table (append-only).

use presensi_core::domain::CreateAttendanceRecord;
use sqlx::PgPool;

use crate::models::attendance_record::AttendanceRecordRow;

/// Column list for `attendance_records` queries.
const COLUMNS: &str = "\
    id, tipe_user, nip, nama, unit_kerja, instansi, nomor_kontak, \
    email, orang_dituju, tujuan, kegiatan, tanda_tangan, waktu_presensi";

/// Provides data access for attendance records.
pub struct AttendanceRecordRepo;

impl AttendanceRecordRepo {
    /// Insert a new record; `waktu_presensi` is assigned by the
    /// database at insert time.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateAttendanceRecord,
    ) -> Result<AttendanceRecordRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records \
                 (tipe_user, nip, nama, unit_kerja, instansi, nomor_kontak, \
                  email, orang_dituju, tujuan, kegiatan, tanda_tangan) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecordRow>(&query)
            .bind(dto.tipe_user.as_str())
            .bind(&dto.nip)
            .bind(&dto.nama)
            .bind(&dto.unit_kerja)
            .bind(&dto.instansi)
            .bind(&dto.nomor_kontak)
            .bind(&dto.email)
            .bind(&dto.orang_dituju)
            .bind(&dto.tujuan)
            .bind(&dto.kegiatan)
            .bind(&dto.tanda_tangan)
            .fetch_one(pool)
            .await
    }

    /// List all records, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AttendanceRecordRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records ORDER BY waktu_presensi DESC"
        );
        sqlx::query_as::<_, AttendanceRecordRow>(&query)
            .fetch_all(pool)
            .await
    }
}
