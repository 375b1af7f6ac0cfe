//! Domain types shared by the wizard engine, the REST client and the
//! API surface. Field names follow the original attendance schema
//! (Indonesian wire names), so the same structs serialize for both the
//! database-facing DTOs and the HTTP payloads.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// User type
// ---------------------------------------------------------------------------

/// Whether the visitor is an internal employee or an external guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Internal,
    Eksternal,
}

impl UserType {
    /// Parse a user type string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "internal" => Ok(Self::Internal),
            "eksternal" => Ok(Self::Eksternal),
            _ => Err(CoreError::Validation(format!(
                "Invalid user type '{s}'. Must be one of: internal, eksternal"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Eksternal => "eksternal",
        }
    }
}

// ---------------------------------------------------------------------------
// Activity mode
// ---------------------------------------------------------------------------

/// How an activity is conducted. `Luring` is in-person, `Daring` is
/// remote; the external-guest step sequence depends on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityMode {
    #[serde(rename = "Luring")]
    Luring,
    #[serde(rename = "Daring")]
    Daring,
}

impl ActivityMode {
    /// Parse a mode string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "Luring" => Ok(Self::Luring),
            "Daring" => Ok(Self::Daring),
            _ => Err(CoreError::Validation(format!(
                "Invalid activity mode '{s}'. Must be one of: Luring, Daring"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Luring => "Luring",
            Self::Daring => "Daring",
        }
    }

    pub fn is_in_person(&self) -> bool {
        matches!(self, Self::Luring)
    }
}

// ---------------------------------------------------------------------------
// Directory / catalog entities (read-only from the engine's perspective)
// ---------------------------------------------------------------------------

/// A directory entry looked up by NIP. Never created or mutated by the
/// wizard engine; the one write (contact sync on internal submission)
/// is a collaborator side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub nip: String,
    pub nama: String,
    pub unit_kerja: String,
    pub nomor_kontak: Option<String>,
}

/// An entry of the activity catalog. Only active activities are offered
/// to the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: DbId,
    pub nama_kegiatan: String,
    pub tipe_kegiatan: ActivityMode,
}

// ---------------------------------------------------------------------------
// Attendance records
// ---------------------------------------------------------------------------

/// Command payload for creating an attendance record. Optional fields
/// that the visitor left empty are `None`, not empty strings, matching
/// the nullable columns of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAttendanceRecord {
    pub tipe_user: UserType,
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
}

/// A persisted attendance record: the finalized draft plus the
/// server-assigned id and timestamp. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub tipe_user: UserType,
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
