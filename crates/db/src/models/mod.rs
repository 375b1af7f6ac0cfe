//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Conversions into the shared domain types live next to the rows so
//! callers never hand raw column strings to the engine.

pub mod activity;
pub mod attendance_record;
pub mod employee;
