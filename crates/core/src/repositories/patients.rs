//! Patient repository.

use super::{Entity, EntityKind, Repository};
use crate::models::{Patient, PatientPatch};
use crate::queries::search_patients;
use clinic_types::EntityId;

pub type PatientRepository = Repository<Patient>;

impl Entity for Patient {
    type Patch = PatientPatch;

    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn merge(&mut self, patch: PatientPatch) {
        patch.merge_into(self);
    }
}

impl Repository<Patient> {
    /// Patients whose name, phone, medical id or email contain `term`.
    pub async fn search(&self, term: &str) -> Vec<Patient> {
        search_patients(&self.get_all().await, term)
    }
}
