//! Repository for the `employees` directory table.

use sqlx::PgPool;

use crate::models::employee::EmployeeRow;

/// Column list for `employees` queries.
const COLUMNS: &str = "\
    id, nip, full_name, unit_kerja, nomor_kontak, \
    created_at, updated_at";

/// Provides data access for the employee directory.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Look up an employee by NIP.
    ///
    /// Matches on the trimmed value on both sides; legacy rows carry
    /// whitespace-padded identifiers.
    pub async fn find_by_nip(
        pool: &PgPool,
        nip: &str,
    ) -> Result<Option<EmployeeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE TRIM(nip) = TRIM($1)");
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(nip)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite an employee's contact number.
    ///
    /// Called when an internal submission carries a contact that
    /// differs from the directory. Returns `None` if the NIP matches
    /// no directory entry.
    pub async fn update_contact(
        pool: &PgPool,
        nip: &str,
        nomor_kontak: &str,
    ) -> Result<Option<EmployeeRow>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET nomor_kontak = $2, updated_at = NOW() \
             WHERE TRIM(nip) = TRIM($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(nip)
            .bind(nomor_kontak)
            .fetch_optional(pool)
            .await
    }
}
