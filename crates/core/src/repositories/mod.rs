//! Repository management modules.
//!
//! One [`Repository`] exists per entity kind. The generic CRUD machinery lives in [`shared`];
//! the per-kind modules bind each model to it and add the few kind-specific lookups.

pub mod appointments;
pub mod doctors;
pub mod medical_records;
pub mod patients;
pub mod shared;

pub use appointments::AppointmentRepository;
pub use doctors::DoctorRepository;
pub use medical_records::MedicalRecordRepository;
pub use patients::PatientRepository;
pub use shared::{Repository, Versioned};

use clinic_types::EntityId;
use std::fmt;

/// The closed set of entity kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Patient,
    Doctor,
    Appointment,
    MedicalRecord,
}

impl EntityKind {
    /// Returns a human-readable name for this entity kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Patient => "Patient",
            EntityKind::Doctor => "Doctor",
            EntityKind::Appointment => "Appointment",
            EntityKind::MedicalRecord => "Medical record",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A model that can be stored in a [`Repository`].
///
/// `Default` supplies the field values of a freshly created entity before its patch is merged.
pub trait Entity: Clone + Default + Send + Sync + 'static {
    /// Partial form used by `create` and `update`. Carries no id.
    type Patch: Send + 'static;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn set_id(&mut self, id: EntityId);

    /// Shallow merge: every field present in `patch` replaces the stored value wholesale.
    fn merge(&mut self, patch: Self::Patch);
}
