//! Employee directory entity model.

use presensi_core::domain::Employee;
use presensi_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row of the `employees` directory table.
///
/// Legacy imports padded `nip` with whitespace, so lookups match on the
/// trimmed value and the conversion below trims it again before it
/// reaches a wire payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeRow {
    pub id: DbId,
    pub nip: String,
    pub full_name: String,
    pub unit_kerja: String,
    pub nomor_kontak: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            nip: row.nip.trim().to_string(),
            nama: row.full_name,
            unit_kerja: row.unit_kerja,
            nomor_kontak: row.nomor_kontak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn conversion_trims_the_identifier() {
        let row = EmployeeRow {
            id: 1,
            nip: "  123456789 ".into(),
            full_name: "Ahmad Wijaya".into(),
            unit_kerja: "Dinas Kominfo".into(),
            nomor_kontak: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let employee = Employee::from(row);
        assert_eq!(employee.nip, "123456789");
        assert_eq!(employee.nama, "Ahmad Wijaya");
    }
}
