use clinic_types::EntityId;

use crate::repositories::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    #[error("{kind} not found")]
    NotFound { kind: EntityKind, id: EntityId },
    #[error("{kind} {id} was modified concurrently (expected version {expected}, found {actual})")]
    StaleVersion {
        kind: EntityKind,
        id: EntityId,
        expected: u64,
        actual: u64,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to parse {kind} fixture: {source}")]
    Fixture {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },
}

impl ClinicError {
    /// Returns `true` if the error reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClinicError::NotFound { .. })
    }
}

pub type ClinicResult<T> = std::result::Result<T, ClinicError>;
