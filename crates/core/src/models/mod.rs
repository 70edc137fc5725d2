//! Clinic entity models.
//!
//! Each entity has a full form (as stored and returned by its repository) and a patch form whose
//! fields are all optional. Patches drive both `create` (merged over the entity's defaults) and
//! `update` (merged over the stored entity). Field names serialise in camelCase with an `Id` key,
//! matching the seed fixtures.

use std::collections::HashSet;

pub mod appointment;
pub mod doctor;
pub mod medical_record;
pub mod patient;

pub use appointment::{Appointment, AppointmentPatch};
pub use doctor::{Availability, Doctor, DoctorPatch};
pub use medical_record::{
    MedicalRecord, MedicalRecordPatch, Prescription, PrescriptionTemplate, TemplateLine,
};
pub use patient::{EmergencyContact, Patient, PatientPatch};

/// Overwrites `target` with the patch value when one is present.
pub(crate) fn merge_field<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Like [`merge_field`] for set-valued lists: duplicates are dropped, keeping the first
/// occurrence of each entry.
pub(crate) fn merge_set(target: &mut Vec<String>, value: Option<Vec<String>>) {
    if let Some(values) = value {
        let mut seen = HashSet::with_capacity(values.len());
        *target = values
            .into_iter()
            .filter(|entry| seen.insert(entry.clone()))
            .collect();
    }
}
