//! Medical record repository.

use super::{Entity, EntityKind, Repository};
use crate::models::{MedicalRecord, MedicalRecordPatch};
use clinic_types::EntityId;

pub type MedicalRecordRepository = Repository<MedicalRecord>;

impl Entity for MedicalRecord {
    type Patch = MedicalRecordPatch;

    const KIND: EntityKind = EntityKind::MedicalRecord;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn merge(&mut self, patch: MedicalRecordPatch) {
        patch.merge_into(self);
    }
}

impl Repository<MedicalRecord> {
    /// Records belonging to one patient, in insertion order.
    pub async fn get_by_patient_id(&self, patient_id: EntityId) -> Vec<MedicalRecord> {
        self.filter(|record| record.patient_id == patient_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdPolicy;
    use crate::latency::LatencySimulator;
    use crate::models::Prescription;
    use chrono::NaiveDate;
    use clinic_types::NonEmptyText;

    fn record(id: EntityId, patient_id: EntityId) -> MedicalRecord {
        MedicalRecord {
            id,
            patient_id,
            doctor_id: 1,
            visit_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            diagnosis: "Hypertension".into(),
            treatment: "Lifestyle changes".into(),
            prescriptions: vec![Prescription::new(
                NonEmptyText::new("Lisinopril").unwrap(),
                "10mg daily",
                "90 days",
            )],
        }
    }

    #[tokio::test]
    async fn test_get_by_patient_id_filters_and_keeps_order() {
        let repo = Repository::seeded(
            vec![record(1, 1), record(2, 2), record(3, 1)],
            LatencySimulator::default(),
            IdPolicy::MaxPlusOne,
        )
        .expect("seed should be valid");

        let ids: Vec<_> = repo
            .get_by_patient_id(1)
            .await
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(repo.get_by_patient_id(9).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_prescription_list() {
        let repo = Repository::seeded(
            vec![record(1, 1)],
            LatencySimulator::default(),
            IdPolicy::MaxPlusOne,
        )
        .expect("seed should be valid");

        let updated = repo
            .update(
                1,
                MedicalRecordPatch {
                    prescriptions: Some(Vec::new()),
                    ..MedicalRecordPatch::default()
                },
            )
            .await
            .expect("update should succeed");

        assert!(updated.prescriptions.is_empty());
        assert_eq!(updated.diagnosis, "Hypertension");
    }
}
