#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No record matched the given lookup key.
    ///
    /// The display form is the user-facing message ("Pegawai tidak
    /// ditemukan"), so `entity` is an Indonesian noun.
    #[error("{entity} tidak ditemukan")]
    NotFound { entity: &'static str, key: String },

    /// Input rejected with a human-readable message.
    #[error("{0}")]
    Validation(String),

    /// A collaborator could not be reached or answered garbage.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
