//! Record submission: command building and the store port.

use async_trait::async_trait;

use crate::domain::{AttendanceRecord, CreateAttendanceRecord};
use crate::error::CoreError;
use crate::validation::validate_contact;
use crate::wizard::Draft;

/// Store collaborator.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Fails with [`CoreError::Validation`] carrying a human-readable
    /// message on server-side rejection, or [`CoreError::Transport`] on
    /// connectivity failure.
    async fn create(&self, command: CreateAttendanceRecord)
        -> Result<AttendanceRecord, CoreError>;
}

#[async_trait]
impl<S: AttendanceStore + ?Sized> AttendanceStore for std::sync::Arc<S> {
    async fn create(
        &self,
        command: CreateAttendanceRecord,
    ) -> Result<AttendanceRecord, CoreError> {
        (**self).create(command).await
    }
}

/// Map an optional field to `None` when empty after trimming.
fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build the create-record command from a finished draft.
///
/// Step gating should make failure impossible by the time the terminal
/// step is reached; the contact re-check here is a final guard against
/// a bypassed UI.
pub fn build_command(draft: &Draft) -> Result<CreateAttendanceRecord, CoreError> {
    let tipe_user = draft
        .user_type
        .ok_or_else(|| CoreError::Validation("Jenis pengguna belum dipilih.".to_string()))?;

    if let Some(hint) = validate_contact(&draft.nomor_kontak) {
        return Err(CoreError::Validation(hint.to_string()));
    }

    Ok(CreateAttendanceRecord {
        tipe_user,
        nip: non_empty(&draft.nip),
        nama: draft.nama.trim().to_string(),
        unit_kerja: non_empty(&draft.unit_kerja),
        instansi: non_empty(&draft.instansi),
        nomor_kontak: non_empty(&draft.nomor_kontak),
        email: non_empty(&draft.email),
        orang_dituju: non_empty(&draft.orang_dituju),
        tujuan: non_empty(&draft.tujuan),
        kegiatan: draft.kegiatan.trim().to_string(),
        tanda_tangan: draft.tanda_tangan.clone(),
    })
}
