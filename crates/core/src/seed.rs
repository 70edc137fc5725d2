//! Seed fixtures.
//!
//! The store starts every process from the same snapshot. The snapshot is compiled into the
//! binary and parsed when a store is constructed; nothing is ever written back.

use crate::constants::{
    APPOINTMENTS_FIXTURE, DOCTORS_FIXTURE, MEDICAL_RECORDS_FIXTURE, PATIENTS_FIXTURE,
};
use crate::models::{Appointment, Doctor, MedicalRecord, Patient};
use crate::repositories::EntityKind;
use crate::{ClinicError, ClinicResult};
use serde::de::DeserializeOwned;

/// Initial contents of all four repositories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedData {
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub appointments: Vec<Appointment>,
    pub medical_records: Vec<MedicalRecord>,
}

impl SeedData {
    /// Parses the built-in fixture snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Fixture`] naming the entity kind whose fixture is malformed.
    pub fn fixture() -> ClinicResult<Self> {
        Ok(Self {
            patients: parse(EntityKind::Patient, PATIENTS_FIXTURE)?,
            doctors: parse(EntityKind::Doctor, DOCTORS_FIXTURE)?,
            appointments: parse(EntityKind::Appointment, APPOINTMENTS_FIXTURE)?,
            medical_records: parse(EntityKind::MedicalRecord, MEDICAL_RECORDS_FIXTURE)?,
        })
    }
}

pub(crate) fn parse<T: DeserializeOwned>(kind: EntityKind, raw: &str) -> ClinicResult<Vec<T>> {
    serde_json::from_str(raw).map_err(|source| ClinicError::Fixture { kind, source })
}
