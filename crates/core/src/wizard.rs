//! Step sequencer for the attendance check-in wizard.
//!
//! The branching step sequence is table-driven: `(user type, activity
//! mode)` selects one of three fixed [`StepKind`] lists, and both the
//! per-step validity predicate and the renderer consume the same table.
//! [`WizardSession`] owns the draft, the current step index, the
//! debounced identifier lookup flow and terminal submission; every
//! mutation goes through a named transition so the whole machine is
//! deterministic under test.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::catalog::{ActivityCatalog, CatalogState};
use crate::debounce::{self, Debounced};
use crate::domain::{Activity, ActivityMode, AttendanceRecord, UserType};
use crate::error::CoreError;
use crate::lookup::{EmployeeDirectory, EmployeeLookup, LookupOutcome};
use crate::signature::{self, SignaturePad};
use crate::submit::{self, AttendanceStore};
use crate::types::DbId;
use crate::validation::{validate_contact, validate_email};

// ---------------------------------------------------------------------------
// Step kinds and sequences
// ---------------------------------------------------------------------------

/// The field-groups a wizard step can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    TypeSelect,
    IdentifierEntry,
    ConfirmIdentity,
    ActivitySelect,
    Name,
    Organization,
    Contact,
    Email,
    TargetPerson,
    Purpose,
    Signature,
    FinalConfirm,
}

impl StepKind {
    /// Heading shown for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::TypeSelect => "Selamat Datang",
            Self::IdentifierEntry => "Input NIP",
            Self::ConfirmIdentity => "Konfirmasi Data",
            Self::ActivitySelect => "Pilih Kegiatan",
            Self::Name => "Data Pribadi",
            Self::Organization => "Instansi",
            Self::Contact => "Kontak",
            Self::Email => "Email",
            Self::TargetPerson => "Orang yang Dituju",
            Self::Purpose => "Tujuan Kedatangan",
            Self::Signature => "Tanda Tangan",
            Self::FinalConfirm => "Konfirmasi Presensi",
        }
    }

    /// Wire names of the fields the step requires to be non-empty.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::TypeSelect => &["tipe_user"],
            Self::IdentifierEntry => &["nip"],
            Self::ConfirmIdentity => &["nama"],
            Self::ActivitySelect => &["kegiatan"],
            Self::Name => &["nama"],
            Self::Organization => &["instansi"],
            Self::Contact => &["nomor_kontak"],
            Self::TargetPerson => &["orang_dituju"],
            Self::Purpose => &["tujuan"],
            Self::Email | Self::Signature | Self::FinalConfirm => &[],
        }
    }
}

const UNSET_STEPS: &[StepKind] = &[StepKind::TypeSelect];

const INTERNAL_STEPS: &[StepKind] = &[
    StepKind::TypeSelect,
    StepKind::IdentifierEntry,
    StepKind::ConfirmIdentity,
    StepKind::ActivitySelect,
    StepKind::Signature,
    StepKind::FinalConfirm,
];

const EKSTERNAL_DARING_STEPS: &[StepKind] = &[
    StepKind::TypeSelect,
    StepKind::ActivitySelect,
    StepKind::Name,
    StepKind::Organization,
    StepKind::Contact,
    StepKind::Email,
    StepKind::Signature,
    StepKind::FinalConfirm,
];

const EKSTERNAL_LURING_STEPS: &[StepKind] = &[
    StepKind::TypeSelect,
    StepKind::ActivitySelect,
    StepKind::Name,
    StepKind::Organization,
    StepKind::Contact,
    StepKind::Email,
    StepKind::TargetPerson,
    StepKind::Purpose,
    StepKind::Signature,
    StepKind::FinalConfirm,
];

/// The ordered step list for a branch.
///
/// Until an activity fixes the mode, an external visitor sees the
/// Daring (shortest) shape: both external branches are identical
/// through step 2, and step 2 cannot be passed before an activity --
/// and therefore a mode -- is chosen.
pub fn step_sequence(
    user_type: Option<UserType>,
    activity_mode: Option<ActivityMode>,
) -> &'static [StepKind] {
    match (user_type, activity_mode) {
        (None, _) => UNSET_STEPS,
        (Some(UserType::Internal), _) => INTERNAL_STEPS,
        (Some(UserType::Eksternal), Some(ActivityMode::Luring)) => EKSTERNAL_LURING_STEPS,
        (Some(UserType::Eksternal), _) => EKSTERNAL_DARING_STEPS,
    }
}

/// Total step count for a branch.
pub fn total_steps(user_type: Option<UserType>, activity_mode: Option<ActivityMode>) -> usize {
    step_sequence(user_type, activity_mode).len()
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The in-progress, unsaved submission being built across steps.
///
/// Owned exclusively by the active [`WizardSession`]; discarded on
/// successful submission or when the visitor starts over with a new
/// user type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Draft {
    pub user_type: Option<UserType>,
    /// Derived from the selected activity; only meaningful for
    /// external visitors.
    pub activity_mode: Option<ActivityMode>,
    /// Raw identifier as typed; lookups run against the settled value.
    pub nip: String,
    /// Whether the last completed lookup found a directory entry.
    /// While set, name and unit are presented read-only by the shell.
    pub employee_match: bool,
    pub nama: String,
    pub unit_kerja: String,
    pub instansi: String,
    pub nomor_kontak: String,
    pub email: String,
    pub orang_dituju: String,
    pub tujuan: String,
    pub kegiatan: String,
    /// Captured signature as a PNG data URL.
    pub tanda_tangan: Option<String>,
    pub contact_error: Option<String>,
    pub email_error: Option<String>,
}

/// Whether a step's required fields are filled and free of format
/// errors. Pure; the advance control is disabled whenever this is
/// false.
pub fn is_step_valid(step: StepKind, draft: &Draft) -> bool {
    match step {
        StepKind::TypeSelect => draft.user_type.is_some(),
        // Non-empty text is not enough: a successful directory match is
        // required to leave the identifier step.
        StepKind::IdentifierEntry => draft.employee_match,
        StepKind::ConfirmIdentity => {
            !draft.nama.trim().is_empty() && draft.contact_error.is_none()
        }
        StepKind::ActivitySelect => !draft.kegiatan.trim().is_empty(),
        StepKind::Name => !draft.nama.trim().is_empty(),
        StepKind::Organization => !draft.instansi.trim().is_empty(),
        StepKind::Contact => {
            !draft.nomor_kontak.trim().is_empty() && draft.contact_error.is_none()
        }
        StepKind::Email => draft.email_error.is_none(),
        StepKind::TargetPerson => !draft.orang_dituju.trim().is_empty(),
        StepKind::Purpose => !draft.tujuan.trim().is_empty(),
        StepKind::Signature | StepKind::FinalConfirm => true,
    }
}

// ---------------------------------------------------------------------------
// Notices
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A transient notification for the shell to toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Snapshot handed to the presentation shell on every change.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub step: usize,
    pub total_steps: usize,
    pub step_kind: StepKind,
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
    pub can_advance: bool,
    pub is_last_step: bool,
    pub draft: Draft,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One visitor's pass through the wizard.
pub struct WizardSession {
    lookup: EmployeeLookup<Arc<dyn EmployeeDirectory>>,
    store: Arc<dyn AttendanceStore>,
    catalog: CatalogState,
    debounce: Debounced<String>,
    settled_rx: watch::Receiver<String>,
    draft: Draft,
    /// 1-based, always within `1..=total_steps()`.
    step: usize,
    notices: Vec<Notice>,
}

impl WizardSession {
    /// Load the activity catalog and start an empty session at step 1.
    ///
    /// A `deep_link` activity id pre-selects that activity and locks
    /// the selector for the whole session.
    pub async fn start(
        directory: Arc<dyn EmployeeDirectory>,
        catalog: &dyn ActivityCatalog,
        store: Arc<dyn AttendanceStore>,
        deep_link: Option<DbId>,
    ) -> Result<Self, CoreError> {
        let catalog = CatalogState::load(catalog, deep_link).await?;
        let debounce = Debounced::new(String::new(), debounce::DEFAULT_DELAY);
        let settled_rx = debounce.subscribe();

        Ok(Self {
            lookup: EmployeeLookup::new(directory),
            store,
            catalog,
            debounce,
            settled_rx,
            draft: Draft::default(),
            step: 1,
            notices: Vec::new(),
        })
    }

    // -- Read side --

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        total_steps(self.draft.user_type, self.draft.activity_mode)
    }

    pub fn current_step(&self) -> StepKind {
        step_sequence(self.draft.user_type, self.draft.activity_mode)[self.step - 1]
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn can_advance(&self) -> bool {
        is_step_valid(self.current_step(), &self.draft)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn view(&self) -> WizardView {
        let kind = self.current_step();
        WizardView {
            step: self.step,
            total_steps: self.total_steps(),
            step_kind: kind,
            label: kind.label(),
            required_fields: kind.required_fields(),
            can_advance: self.can_advance(),
            is_last_step: self.is_last_step(),
            draft: self.draft.clone(),
        }
    }

    /// Drain pending notifications.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // -- Transitions --

    /// Step 1: choose internal or external.
    ///
    /// Starts the branch over: previously entered data belongs to the
    /// old branch, and identifier, match flag and error slots are
    /// always cleared.
    pub fn select_user_type(&mut self, user_type: UserType) {
        self.draft = Draft {
            user_type: Some(user_type),
            ..Draft::default()
        };
        self.debounce.set(String::new());
        if let Some(activity) = self.catalog.locked().cloned() {
            self.apply_activity(&activity);
        }
        self.step = 2.min(self.total_steps());
        tracing::debug!(user_type = user_type.as_str(), "User type selected");
    }

    /// Choose an activity from the loaded catalog. Refused when a
    /// deep link already locked a different one.
    pub fn select_activity(&mut self, id: DbId) -> Result<(), CoreError> {
        if let Some(locked) = self.catalog.locked() {
            if locked.id != id {
                return Err(CoreError::Validation(
                    "Kegiatan sudah ditentukan dan tidak dapat diubah.".to_string(),
                ));
            }
        }
        let activity = self
            .catalog
            .find(id)
            .cloned()
            .ok_or(CoreError::NotFound {
                entity: "Kegiatan",
                key: id.to_string(),
            })?;
        self.apply_activity(&activity);
        Ok(())
    }

    fn apply_activity(&mut self, activity: &Activity) {
        self.draft.kegiatan = activity.nama_kegiatan.clone();
        if self.draft.user_type == Some(UserType::Eksternal) {
            self.draft.activity_mode = Some(activity.tipe_kegiatan);
        }
        // The branch may have shrunk; never present an index beyond
        // the new bound.
        self.step = self.step.min(self.total_steps());
    }

    /// Advance one step when the current step is valid. Leaving the
    /// signature step first captures the pad (empty pad -> no value).
    /// No-op at the terminal step; use [`submit`](Self::submit) there.
    pub fn advance(&mut self, pad: &dyn SignaturePad) {
        if !self.can_advance() {
            return;
        }
        if self.current_step() == StepKind::Signature {
            self.draft.tanda_tangan = signature::capture(pad);
        }
        if self.step < self.total_steps() {
            self.step += 1;
        }
    }

    /// Go back one step, keeping entered data. No-op at step 1.
    pub fn retreat(&mut self) {
        if self.step > 1 {
            self.step -= 1;
        }
    }

    // -- Field setters --

    /// Record a keystroke in the identifier field. The raw value lands
    /// in the draft immediately; the lookup flow only sees it once it
    /// has been stable for the debounce delay.
    pub fn set_identifier(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.draft.nip = raw.clone();
        self.debounce.set(raw);
    }

    pub fn set_nama(&mut self, value: impl Into<String>) {
        self.draft.nama = value.into();
    }

    pub fn set_unit_kerja(&mut self, value: impl Into<String>) {
        self.draft.unit_kerja = value.into();
    }

    pub fn set_instansi(&mut self, value: impl Into<String>) {
        self.draft.instansi = value.into();
    }

    pub fn set_nomor_kontak(&mut self, value: impl Into<String>) {
        self.draft.nomor_kontak = value.into();
        self.draft.contact_error =
            validate_contact(&self.draft.nomor_kontak).map(String::from);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
        self.draft.email_error = validate_email(&self.draft.email).map(String::from);
    }

    pub fn set_orang_dituju(&mut self, value: impl Into<String>) {
        self.draft.orang_dituju = value.into();
    }

    pub fn set_tujuan(&mut self, value: impl Into<String>) {
        self.draft.tujuan = value.into();
    }

    // -- Lookup flow --

    /// Await the next settled identifier and resolve it against the
    /// directory. Driven in a loop by the shell while the identifier
    /// step is active. Returns `false` when the session's debounce
    /// channel is gone.
    pub async fn next_lookup(&mut self) -> bool {
        if self.settled_rx.changed().await.is_err() {
            return false;
        }
        let settled = self.settled_rx.borrow_and_update().clone();
        let outcome = self.lookup.resolve(&settled).await;
        self.apply_lookup(&settled, outcome);
        true
    }

    /// Apply a lookup outcome obtained for `requested_for`.
    ///
    /// A slow response for a superseded identifier is discarded: state
    /// updates are keyed off the identifier the response corresponds
    /// to, not off arrival order.
    pub fn apply_lookup(&mut self, requested_for: &str, outcome: LookupOutcome) {
        if requested_for != self.debounce.settled() {
            tracing::debug!(nip = %requested_for, "Discarding stale lookup response");
            return;
        }

        match outcome {
            LookupOutcome::Found(employee) => {
                self.push_notice(
                    NoticeLevel::Success,
                    "Data ditemukan",
                    format!("Selamat datang, {}!", employee.nama),
                );
                self.draft.nama = employee.nama;
                self.draft.unit_kerja = employee.unit_kerja;
                self.draft.nomor_kontak = employee.nomor_kontak.unwrap_or_default();
                // A directory value may itself be malformed; surface
                // that instead of silently trusting it.
                self.draft.contact_error =
                    validate_contact(&self.draft.nomor_kontak).map(String::from);
                self.draft.employee_match = true;
            }
            LookupOutcome::NotFound => {
                self.clear_lookup_fields();
                self.push_notice(
                    NoticeLevel::Error,
                    "NIP tidak ditemukan",
                    "Silakan hubungi administrator untuk verifikasi data.".to_string(),
                );
            }
            LookupOutcome::TransportFailed(message) => {
                self.clear_lookup_fields();
                self.push_notice(NoticeLevel::Error, "Gagal menghubungi server", message);
            }
            LookupOutcome::Skipped => {
                self.clear_lookup_fields();
            }
        }
    }

    fn clear_lookup_fields(&mut self) {
        self.draft.employee_match = false;
        self.draft.nama.clear();
        self.draft.unit_kerja.clear();
        self.draft.nomor_kontak.clear();
        self.draft.contact_error = None;
    }

    // -- Submission --

    /// Terminal-step submission.
    ///
    /// On success the caller receives the persisted record and the
    /// whole session resets to step 1. On failure the draft and step
    /// are left untouched for correction and retry, and the server's
    /// message is surfaced as an error notice.
    pub async fn submit(&mut self) -> Result<AttendanceRecord, CoreError> {
        if self.current_step() != StepKind::FinalConfirm {
            return Err(CoreError::Validation(
                "Presensi hanya dapat dikirim pada langkah konfirmasi.".to_string(),
            ));
        }

        let command = match submit::build_command(&self.draft) {
            Ok(command) => command,
            Err(err) => {
                self.push_notice(NoticeLevel::Error, "Presensi gagal disimpan", err.to_string());
                return Err(err);
            }
        };

        match self.store.create(command).await {
            Ok(record) => {
                tracing::info!(record_id = record.id, "Attendance record submitted");
                self.push_notice(
                    NoticeLevel::Success,
                    "Presensi berhasil dicatat",
                    "Terima kasih atas kehadiran Anda!".to_string(),
                );
                self.reset();
                Ok(record)
            }
            Err(err) => {
                self.push_notice(NoticeLevel::Error, "Presensi gagal disimpan", err.to_string());
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.draft = Draft::default();
        self.step = 1;
        self.debounce.set(String::new());
    }

    fn push_notice(&mut self, level: NoticeLevel, title: &'static str, message: String) {
        self.notices.push(Notice {
            level,
            title,
            message,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreateAttendanceRecord, Employee};
    use crate::signature::test_support::FakePad;
    use crate::validation::CONTACT_FORMAT_HINT;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    // -- Fakes --

    struct TestDirectory {
        employees: Vec<Employee>,
        fail: bool,
    }

    #[async_trait]
    impl EmployeeDirectory for TestDirectory {
        async fn find_by_nip(&self, nip: &str) -> Result<Option<Employee>, CoreError> {
            if self.fail {
                return Err(CoreError::Transport("connection refused".into()));
            }
            Ok(self.employees.iter().find(|e| e.nip == nip).cloned())
        }
    }

    struct TestCatalog(Vec<Activity>);

    #[async_trait]
    impl ActivityCatalog for TestCatalog {
        async fn list_active(&self) -> Result<Vec<Activity>, CoreError> {
            Ok(self.0.clone())
        }
    }

    struct TestStore {
        reject_with: Option<String>,
    }

    #[async_trait]
    impl AttendanceStore for TestStore {
        async fn create(
            &self,
            command: CreateAttendanceRecord,
        ) -> Result<AttendanceRecord, CoreError> {
            if let Some(message) = &self.reject_with {
                return Err(CoreError::Validation(message.clone()));
            }
            Ok(AttendanceRecord {
                id: 42,
                tipe_user: command.tipe_user,
                nip: command.nip,
                nama: command.nama,
                unit_kerja: command.unit_kerja,
                instansi: command.instansi,
                nomor_kontak: command.nomor_kontak,
                email: command.email,
                orang_dituju: command.orang_dituju,
                tujuan: command.tujuan,
                kegiatan: command.kegiatan,
                tanda_tangan: command.tanda_tangan,
                waktu_presensi: chrono::Utc::now(),
            })
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

    fn activities() -> Vec<Activity> {
        vec![
            Activity {
                id: 1,
                nama_kegiatan: "Rapat Koordinasi".into(),
                tipe_kegiatan: ActivityMode::Luring,
            },
            Activity {
                id: 2,
                nama_kegiatan: "Sosialisasi Keamanan Informasi".into(),
                tipe_kegiatan: ActivityMode::Daring,
            },
        ]
    }

    async fn session() -> WizardSession {
        session_with(None, None).await
    }

    async fn session_with(
        reject_with: Option<String>,
        deep_link: Option<DbId>,
    ) -> WizardSession {
        WizardSession::start(
            Arc::new(TestDirectory {
                employees: vec![ahmad()],
                fail: false,
            }),
            &TestCatalog(activities()),
            Arc::new(TestStore { reject_with }),
            deep_link,
        )
        .await
        .unwrap()
    }

    /// Walk an external visitor up to the given step, filling required
    /// fields along the way.
    async fn external_session_at_contact_step(activity_id: DbId) -> WizardSession {
        let mut s = session().await;
        s.select_user_type(UserType::Eksternal);
        s.select_activity(activity_id).unwrap();
        s.advance(&FakePad(None)); // -> Name
        s.set_nama("Budi Santoso");
        s.advance(&FakePad(None)); // -> Organization
        s.set_instansi("PT Maju Jaya");
        s.advance(&FakePad(None)); // -> Contact
        s
    }

    // -- Step tables --

    #[test]
    fn total_steps_table() {
        assert_eq!(total_steps(None, None), 1);
        for mode in [None, Some(ActivityMode::Luring), Some(ActivityMode::Daring)] {
            assert_eq!(total_steps(Some(UserType::Internal), mode), 6);
        }
        assert_eq!(
            total_steps(Some(UserType::Eksternal), Some(ActivityMode::Daring)),
            8
        );
        assert_eq!(
            total_steps(Some(UserType::Eksternal), Some(ActivityMode::Luring)),
            10
        );
    }

    #[test]
    fn every_sequence_starts_with_type_select_and_ends_with_confirm() {
        for (user_type, mode) in [
            (None, None),
            (Some(UserType::Internal), None),
            (Some(UserType::Eksternal), Some(ActivityMode::Daring)),
            (Some(UserType::Eksternal), Some(ActivityMode::Luring)),
        ] {
            let seq = step_sequence(user_type, mode);
            assert_eq!(seq[0], StepKind::TypeSelect);
            if seq.len() > 1 {
                assert_eq!(seq[seq.len() - 1], StepKind::FinalConfirm);
                assert_eq!(seq[seq.len() - 2], StepKind::Signature);
            }
        }
    }

    #[test]
    fn luring_inserts_target_person_and_purpose_before_signature() {
        let daring: Vec<_> = EKSTERNAL_DARING_STEPS.to_vec();
        let mut expected = daring.clone();
        expected.splice(6..6, [StepKind::TargetPerson, StepKind::Purpose]);
        assert_eq!(EKSTERNAL_LURING_STEPS, expected.as_slice());
    }

    // -- Validity predicate --

    #[test]
    fn contact_error_invalidates_every_step_showing_the_contact_field() {
        let draft = Draft {
            nama: "Budi".into(),
            nomor_kontak: "0712345".into(),
            contact_error: Some(CONTACT_FORMAT_HINT.into()),
            ..Draft::default()
        };
        assert!(!is_step_valid(StepKind::Contact, &draft));
        assert!(!is_step_valid(StepKind::ConfirmIdentity, &draft));
    }

    #[test]
    fn whitespace_only_values_do_not_satisfy_required_fields() {
        let draft = Draft {
            instansi: "   ".into(),
            orang_dituju: "\t".into(),
            ..Draft::default()
        };
        assert!(!is_step_valid(StepKind::Organization, &draft));
        assert!(!is_step_valid(StepKind::TargetPerson, &draft));
    }

    #[test]
    fn signature_and_final_confirm_are_always_valid() {
        let draft = Draft::default();
        assert!(is_step_valid(StepKind::Signature, &draft));
        assert!(is_step_valid(StepKind::FinalConfirm, &draft));
    }

    // -- Transitions --

    #[tokio::test(start_paused = true)]
    async fn selecting_a_user_type_advances_and_resets_the_branch() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        assert_eq!(s.step(), 2);
        assert_eq!(s.current_step(), StepKind::IdentifierEntry);

        // Switching branches starts over.
        s.set_identifier("123456789");
        s.select_user_type(UserType::Eksternal);
        assert_eq!(s.step(), 2);
        assert_eq!(s.draft().nip, "");
        assert!(!s.draft().employee_match);
        assert_eq!(s.current_step(), StepKind::ActivitySelect);
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_keeps_entered_data_and_stops_at_step_one() {
        let mut s = external_session_at_contact_step(2).await;
        assert_eq!(s.current_step(), StepKind::Contact);

        s.retreat();
        assert_eq!(s.current_step(), StepKind::Organization);
        assert_eq!(s.draft().instansi, "PT Maju Jaya");

        for _ in 0..10 {
            s.retreat();
        }
        assert_eq!(s.step(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reselecting_an_activity_clamps_the_step_index() {
        // Luring branch (10 steps), walk past the Daring bound.
        let mut s = external_session_at_contact_step(1).await;
        s.set_nomor_kontak("08123456789");
        s.advance(&FakePad(None)); // -> Email
        s.advance(&FakePad(None)); // -> TargetPerson
        s.set_orang_dituju("Kepala Dinas");
        s.advance(&FakePad(None)); // -> Purpose
        s.set_tujuan("Koordinasi program");
        s.advance(&FakePad(None)); // -> Signature (step 9)
        assert_eq!(s.step(), 9);

        // Switching to a Daring activity shrinks the branch to 8 steps.
        s.select_activity(2).unwrap();
        assert_eq!(s.total_steps(), 8);
        assert_eq!(s.step(), 8);
        assert_eq!(s.current_step(), StepKind::FinalConfirm);
    }

    #[tokio::test(start_paused = true)]
    async fn advance_is_refused_while_the_step_is_invalid() {
        let mut s = session().await;
        s.select_user_type(UserType::Eksternal);
        s.select_activity(1).unwrap();
        s.advance(&FakePad(None)); // -> Name
        assert_eq!(s.current_step(), StepKind::Name);

        assert!(!s.can_advance());
        s.advance(&FakePad(None));
        assert_eq!(s.current_step(), StepKind::Name, "advance must be a no-op");

        s.set_nama("Budi Santoso");
        assert!(s.can_advance());
        s.advance(&FakePad(None));
        assert_eq!(s.current_step(), StepKind::Organization);
    }

    #[tokio::test(start_paused = true)]
    async fn target_person_gates_the_luring_branch() {
        let mut s = external_session_at_contact_step(1).await;
        s.set_nomor_kontak("08123456789");
        s.set_email("budi@majujaya.co.id");
        s.advance(&FakePad(None)); // -> Email
        s.advance(&FakePad(None)); // -> TargetPerson
        assert_eq!(s.current_step(), StepKind::TargetPerson);

        assert!(!s.can_advance());
        s.set_orang_dituju("Kepala Dinas");
        assert!(s.can_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_the_signature_step_captures_the_pad() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        s.apply_lookup("", LookupOutcome::Found(ahmad()));
        s.advance(&FakePad(None)); // -> ConfirmIdentity
        s.advance(&FakePad(None)); // -> ActivitySelect
        s.select_activity(1).unwrap();
        s.advance(&FakePad(None)); // -> Signature
        assert_eq!(s.current_step(), StepKind::Signature);

        s.advance(&FakePad(Some(vec![0x89, 0x50, 0x4e, 0x47])));
        assert_eq!(s.current_step(), StepKind::FinalConfirm);
        assert!(s
            .draft()
            .tanda_tangan
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_signature_pad_stores_no_value() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        s.apply_lookup("", LookupOutcome::Found(ahmad()));
        s.advance(&FakePad(None));
        s.advance(&FakePad(None));
        s.select_activity(1).unwrap();
        s.advance(&FakePad(None)); // -> Signature
        s.advance(&FakePad(None)); // leave with an empty pad
        assert_eq!(s.draft().tanda_tangan, None);
    }

    // -- Lookup flow --

    #[tokio::test(start_paused = true)]
    async fn settled_identifier_prefills_and_enables_advance() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        s.set_identifier("123456789");

        assert!(s.next_lookup().await);
        let draft = s.draft();
        assert!(draft.employee_match);
        assert_eq!(draft.nama, "Ahmad Wijaya");
        assert_eq!(draft.unit_kerja, "Dinas Kominfo");
        assert_eq!(draft.nomor_kontak, "0812345678901");
        assert_eq!(draft.contact_error, None);

        assert!(s.can_advance());
        s.advance(&FakePad(None));
        assert_eq!(s.step(), 3);

        let notices = s.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].message, "Selamat datang, Ahmad Wijaya!");
    }

    #[tokio::test(start_paused = true)]
    async fn short_identifier_clears_dependent_fields() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        s.set_identifier("123456789");
        assert!(s.next_lookup().await);
        assert!(s.draft().employee_match);

        // Backspacing below the lookup threshold clears everything the
        // match filled in, but keeps the raw identifier.
        s.set_identifier("12");
        assert!(s.next_lookup().await);
        let draft = s.draft();
        assert!(!draft.employee_match);
        assert_eq!(draft.nip, "12");
        assert_eq!(draft.nama, "");
        assert_eq!(draft.unit_kerja, "");
        assert_eq!(draft.nomor_kontak, "");
        assert!(!s.can_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_identifier_degrades_to_manual_entry() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);
        s.set_identifier("999999999");
        assert!(s.next_lookup().await);

        assert!(!s.draft().employee_match);
        let notices = s.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].title, "NIP tidak ditemukan");
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_directory_contact_is_surfaced_not_trusted() {
        let mut s = WizardSession::start(
            Arc::new(TestDirectory {
                employees: vec![Employee {
                    nomor_kontak: Some("021-555-123".into()),
                    ..ahmad()
                }],
                fail: false,
            }),
            &TestCatalog(activities()),
            Arc::new(TestStore { reject_with: None }),
            None,
        )
        .await
        .unwrap();

        s.select_user_type(UserType::Internal);
        s.set_identifier("123456789");
        assert!(s.next_lookup().await);

        assert!(s.draft().employee_match);
        assert_eq!(s.draft().contact_error.as_deref(), Some(CONTACT_FORMAT_HINT));
        // The confirm step refuses to advance until the contact is fixed.
        s.advance(&FakePad(None));
        assert!(!s.can_advance());
    }

    #[tokio::test(start_paused = true)]
    async fn directory_outage_reports_a_distinct_error() {
        let mut s = WizardSession::start(
            Arc::new(TestDirectory {
                employees: vec![],
                fail: true,
            }),
            &TestCatalog(activities()),
            Arc::new(TestStore { reject_with: None }),
            None,
        )
        .await
        .unwrap();

        s.select_user_type(UserType::Internal);
        s.set_identifier("123456789");
        assert!(s.next_lookup().await);

        assert!(!s.draft().employee_match);
        let notices = s.take_notices();
        assert_eq!(notices[0].title, "Gagal menghubungi server");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_lookup_response_is_discarded() {
        let mut s = session().await;
        s.select_user_type(UserType::Internal);

        // "999999999" settles; a late response for the superseded
        // "123456789" arrives afterwards and must not win.
        s.set_identifier("999999999");
        tokio::time::advance(debounce::DEFAULT_DELAY + std::time::Duration::from_millis(50))
            .await;
        s.apply_lookup("123456789", LookupOutcome::Found(ahmad()));

        assert!(!s.draft().employee_match);
        assert_eq!(s.draft().nama, "");
        assert!(s.take_notices().is_empty());
    }

    // -- Catalog lock --

    #[tokio::test(start_paused = true)]
    async fn deep_link_preselects_and_locks_the_activity() {
        let mut s = session_with(None, Some(2)).await;
        s.select_user_type(UserType::Eksternal);

        assert_eq!(s.draft().kegiatan, "Sosialisasi Keamanan Informasi");
        assert_eq!(s.draft().activity_mode, Some(ActivityMode::Daring));
        assert_matches!(s.select_activity(1), Err(CoreError::Validation(_)));
        // Re-selecting the locked activity itself is harmless.
        assert!(s.select_activity(2).is_ok());
    }

    // -- Submission --

    async fn filled_daring_session(reject_with: Option<String>) -> WizardSession {
        let mut s = session_with(reject_with, None).await;
        s.select_user_type(UserType::Eksternal);
        s.select_activity(2).unwrap();
        s.advance(&FakePad(None));
        s.set_nama("Budi Santoso");
        s.advance(&FakePad(None));
        s.set_instansi("PT Maju Jaya");
        s.advance(&FakePad(None));
        s.set_nomor_kontak("08123456789");
        s.advance(&FakePad(None));
        s.set_email("budi@majujaya.co.id");
        s.advance(&FakePad(None));
        s.advance(&FakePad(Some(vec![1, 2, 3]))); // signature
        assert!(s.is_last_step());
        s
    }

    #[tokio::test(start_paused = true)]
    async fn successful_submission_resets_the_whole_session() {
        let mut s = filled_daring_session(None).await;
        let record = s.submit().await.unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.nama, "Budi Santoso");
        assert_eq!(record.instansi.as_deref(), Some("PT Maju Jaya"));
        assert_eq!(record.orang_dituju, None, "empty optional maps to None");

        assert_eq!(s.step(), 1);
        assert_eq!(*s.draft(), Draft::default());
        let notices = s.take_notices();
        assert_eq!(notices.last().unwrap().title, "Presensi berhasil dicatat");
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_submission_keeps_draft_and_step_for_retry() {
        let server_message =
            "Format Nomor Kontak tidak valid. Harus diawali 08 dan memiliki 10-13 digit.";
        let mut s = filled_daring_session(Some(server_message.to_string())).await;

        let err = s.submit().await.unwrap_err();
        assert_matches!(err, CoreError::Validation(_));

        // Exact server message, untouched draft, same step.
        let notices = s.take_notices();
        assert_eq!(notices.last().unwrap().message, server_message);
        assert_eq!(s.draft().nama, "Budi Santoso");
        assert!(s.is_last_step());

        // The visitor can correct and resubmit.
        s.set_nomor_kontak("08123456780");
        assert_eq!(s.draft().nomor_kontak, "08123456780");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_off_the_terminal_step_is_refused() {
        let mut s = session().await;
        s.select_user_type(UserType::Eksternal);
        assert_matches!(s.submit().await, Err(CoreError::Validation(_)));
    }
}
