//! Employee lookup by NIP.
//!
//! Consumes identifier values that have already settled through the
//! debounce primitive and turns directory answers into one of four
//! outcomes the wizard can apply. "Not found" and transport failure are
//! deliberately distinct: the first is a normal answer, the second gets
//! its own notification.

use async_trait::async_trait;

use crate::domain::Employee;
use crate::error::CoreError;

/// Identifiers shorter than this never trigger a directory request.
pub const MIN_LOOKUP_LEN: usize = 3;

/// Read-only directory collaborator.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// `Ok(None)` when no entry matches; `Err(Transport)` when the
    /// directory cannot be reached.
    async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, CoreError>;
}

#[async_trait]
impl<D: EmployeeDirectory + ?Sized> EmployeeDirectory for std::sync::Arc<D> {
    async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, CoreError> {
        (**self).find_by_nip(nip).await
    }
}

/// Result of resolving one settled identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Identifier too short; no request was made.
    Skipped,
    Found(Employee),
    NotFound,
    /// The directory was unreachable; degrades to manual entry like
    /// `NotFound`, but surfaced with a distinct error notice.
    TransportFailed(String),
}

/// Lookup client over an [`EmployeeDirectory`].
#[derive(Debug, Clone)]
pub struct EmployeeLookup<D> {
    directory: D,
}

impl<D: EmployeeDirectory> EmployeeLookup<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Resolve a settled identifier into an outcome.
    pub async fn resolve(&self, identifier: &str) -> LookupOutcome {
        let nip = identifier.trim();
        if nip.chars().count() < MIN_LOOKUP_LEN {
            return LookupOutcome::Skipped;
        }

        match self.directory.find_by_nip(nip).await {
            Ok(Some(employee)) => {
                tracing::debug!(nip = %nip, nama = %employee.nama, "Employee found");
                LookupOutcome::Found(employee)
            }
            Ok(None) | Err(CoreError::NotFound { .. }) => {
                tracing::debug!(nip = %nip, "Employee not found");
                LookupOutcome::NotFound
            }
            Err(err) => {
                tracing::warn!(nip = %nip, error = %err, "Employee lookup failed");
                LookupOutcome::TransportFailed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct FixedDirectory {
        employee: Option<Employee>,
        fail: bool,
    }

    #[async_trait]
    impl EmployeeDirectory for FixedDirectory {
        async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, CoreError> {
            if self.fail {
                return Err(CoreError::Transport("connection refused".into()));
            }
            Ok(self.employee.clone().filter(|e| e.nip == nip))
        }
    }

    fn ahmad() -> Employee {
        Employee {
            nip: "123456789".into(),
            nama: "Ahmad Wijaya".into(),
            unit_kerja: "Dinas Kominfo".into(),
            nomor_kontak: Some("0812345678901".into()),
        }
    }

    #[tokio::test]
    async fn short_identifier_is_skipped_without_a_request() {
        // A failing directory proves no request is issued.
        let lookup = EmployeeLookup::new(FixedDirectory {
            employee: None,
            fail: true,
        });
        assert_eq!(lookup.resolve("12").await, LookupOutcome::Skipped);
        assert_eq!(lookup.resolve("  1  ").await, LookupOutcome::Skipped);
        assert_eq!(lookup.resolve("").await, LookupOutcome::Skipped);
    }

    #[tokio::test]
    async fn found_returns_the_directory_entry() {
        let lookup = EmployeeLookup::new(FixedDirectory {
            employee: Some(ahmad()),
            fail: false,
        });
        assert_matches!(
            lookup.resolve("123456789").await,
            LookupOutcome::Found(e) if e.nama == "Ahmad Wijaya"
        );
    }

    #[tokio::test]
    async fn identifier_is_trimmed_before_the_request() {
        let lookup = EmployeeLookup::new(FixedDirectory {
            employee: Some(ahmad()),
            fail: false,
        });
        assert_matches!(
            lookup.resolve(" 123456789 ").await,
            LookupOutcome::Found(_)
        );
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let lookup = EmployeeLookup::new(FixedDirectory {
            employee: Some(ahmad()),
            fail: false,
        });
        assert_eq!(lookup.resolve("999999999").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_not_found() {
        let lookup = EmployeeLookup::new(FixedDirectory {
            employee: None,
            fail: true,
        });
        assert_matches!(
            lookup.resolve("123456789").await,
            LookupOutcome::TransportFailed(_)
        );
    }
}
