//! Doctor repository.

use super::{Entity, EntityKind, Repository};
use crate::models::{Doctor, DoctorPatch};
use clinic_types::EntityId;

pub type DoctorRepository = Repository<Doctor>;

impl Entity for Doctor {
    type Patch = DoctorPatch;

    const KIND: EntityKind = EntityKind::Doctor;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn merge(&mut self, patch: DoctorPatch) {
        patch.merge_into(self);
    }
}
