//! Appointment repository.

use super::{Entity, EntityKind, Repository};
use crate::models::{Appointment, AppointmentPatch};
use crate::ClinicResult;
use clinic_types::{AppointmentStatus, EntityId};

pub type AppointmentRepository = Repository<Appointment>;

impl Entity for Appointment {
    type Patch = AppointmentPatch;

    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn merge(&mut self, patch: AppointmentPatch) {
        patch.merge_into(self);
    }
}

impl Repository<Appointment> {
    /// Moves an appointment to `status`. Any status may follow any other.
    pub async fn set_status(&self, id: EntityId, status: AppointmentStatus) -> ClinicResult<Appointment> {
        self.update(id, AppointmentPatch::status(status)).await
    }
}
