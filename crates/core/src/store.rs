//! The clinic store: one repository per entity kind plus the joins that span them.
//!
//! A store is an ordinary value built from a [`CoreConfig`] and a [`SeedData`] snapshot. There is
//! no process-wide instance; each test or binary constructs its own.
//!
//! Joins fetch the repositories they need concurrently, so a join costs the longest of the
//! involved delays rather than their sum. Foreign keys that point at deleted or never-existing
//! entities come back as `None` rather than as errors.

use crate::config::CoreConfig;
use crate::latency::LatencySimulator;
use crate::models::{Appointment, Doctor, MedicalRecord, Patient};
use crate::queries::{
    appointments_for_doctor_on, appointments_for_patient, appointments_on, dashboard_stats,
    records_for_patient, DashboardStats,
};
use crate::repositories::{
    AppointmentRepository, DoctorRepository, EntityKind, MedicalRecordRepository,
    PatientRepository, Repository,
};
use crate::seed::SeedData;
use crate::ClinicResult;
use chrono::NaiveDate;
use clinic_types::EntityId;
use serde::Serialize;

/// A patient with everything recorded against them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientOverview {
    pub patient: Patient,
    pub appointments: Vec<Appointment>,
    pub records: Vec<MedicalRecord>,
}

/// One appointment joined with the people it refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub appointment: Appointment,
    /// `None` when the appointment refers to a patient that does not exist.
    pub patient: Option<Patient>,
    /// `None` when the appointment refers to a doctor that does not exist.
    pub doctor: Option<Doctor>,
}

#[derive(Clone, Debug)]
pub struct ClinicStore {
    patients: PatientRepository,
    doctors: DoctorRepository,
    appointments: AppointmentRepository,
    medical_records: MedicalRecordRepository,
}

impl ClinicStore {
    /// Builds a store holding `seed`, with latency and id policy taken from `cfg`.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidInput`](crate::ClinicError::InvalidInput) if a seed
    /// collection contains duplicate or zero ids.
    pub fn new(cfg: &CoreConfig, seed: SeedData) -> ClinicResult<Self> {
        let latency = |kind: EntityKind| LatencySimulator::new(cfg.latency().for_kind(kind));
        let policy = cfg.id_policy();

        let store = Self {
            patients: Repository::seeded(seed.patients, latency(EntityKind::Patient), policy)?,
            doctors: Repository::seeded(seed.doctors, latency(EntityKind::Doctor), policy)?,
            appointments: Repository::seeded(
                seed.appointments,
                latency(EntityKind::Appointment),
                policy,
            )?,
            medical_records: Repository::seeded(
                seed.medical_records,
                latency(EntityKind::MedicalRecord),
                policy,
            )?,
        };

        tracing::info!(?policy, "clinic store initialised");
        Ok(store)
    }

    /// Builds a store from the built-in fixture snapshot.
    pub fn from_fixture(cfg: &CoreConfig) -> ClinicResult<Self> {
        Self::new(cfg, SeedData::fixture()?)
    }

    pub fn patients(&self) -> &PatientRepository {
        &self.patients
    }

    pub fn doctors(&self) -> &DoctorRepository {
        &self.doctors
    }

    pub fn appointments(&self) -> &AppointmentRepository {
        &self.appointments
    }

    pub fn medical_records(&self) -> &MedicalRecordRepository {
        &self.medical_records
    }

    /// The patient with their appointment history and medical records, or `None` if the
    /// patient does not exist.
    pub async fn patient_overview(&self, patient_id: EntityId) -> Option<PatientOverview> {
        let (patient, appointments, records) = tokio::join!(
            self.patients.get_by_id(patient_id),
            self.appointments.get_all(),
            self.medical_records.get_all(),
        );

        let patient = patient?;
        Some(PatientOverview {
            patient,
            appointments: appointments_for_patient(&appointments, patient_id),
            records: records_for_patient(&records, patient_id),
        })
    }

    /// Every appointment on `date`, joined with its patient and doctor.
    pub async fn daily_schedule(&self, date: NaiveDate) -> Vec<ScheduleEntry> {
        let (appointments, patients, doctors) = tokio::join!(
            self.appointments.get_all(),
            self.patients.get_all(),
            self.doctors.get_all(),
        );

        join_schedule(appointments_on(&appointments, date), &patients, &doctors)
    }

    /// One doctor's appointments on `date`, joined with their patients.
    pub async fn doctor_schedule(&self, doctor_id: EntityId, date: NaiveDate) -> Vec<ScheduleEntry> {
        let (appointments, patients, doctors) = tokio::join!(
            self.appointments.get_all(),
            self.patients.get_all(),
            self.doctors.get_all(),
        );

        join_schedule(
            appointments_for_doctor_on(&appointments, doctor_id, date),
            &patients,
            &doctors,
        )
    }

    pub async fn dashboard(&self, today: NaiveDate) -> DashboardStats {
        let (patients, appointments) =
            tokio::join!(self.patients.get_all(), self.appointments.get_all());
        dashboard_stats(&patients, &appointments, today)
    }
}

fn join_schedule(
    appointments: Vec<Appointment>,
    patients: &[Patient],
    doctors: &[Doctor],
) -> Vec<ScheduleEntry> {
    appointments
        .into_iter()
        .map(|appointment| ScheduleEntry {
            patient: patients
                .iter()
                .find(|p| p.id == appointment.patient_id)
                .cloned(),
            doctor: doctors
                .iter()
                .find(|d| d.id == appointment.doctor_id)
                .cloned(),
            appointment,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyProfile;
    use crate::id::IdPolicy;
    use crate::models::PatientPatch;
    use std::time::Duration;
    use tokio::time::Instant;

    fn fixture_store() -> ClinicStore {
        ClinicStore::from_fixture(&CoreConfig::default()).expect("fixture store should build")
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_patient_overview_joins_by_patient_id() {
        let store = fixture_store();
        let overview = store
            .patient_overview(1)
            .await
            .expect("patient 1 should exist");

        assert_eq!(overview.patient.name, "Sarah Johnson");
        assert!(overview.appointments.iter().all(|a| a.patient_id == 1));
        assert_eq!(overview.appointments.len(), 2);
        assert!(overview.records.iter().all(|r| r.patient_id == 1));
        assert_eq!(overview.records.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_patient_overview_absent_patient() {
        let store = fixture_store();
        assert_eq!(store.patient_overview(999).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_joins_fetch_concurrently() {
        let store = fixture_store();
        let started = Instant::now();
        store.daily_schedule(jan(10)).await;
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(750), "delays overlap rather than add up");
    }

    #[tokio::test(start_paused = true)]
    async fn test_daily_schedule_keeps_dangling_references() {
        let store = fixture_store();
        store.patients().delete(3).await.expect("delete should succeed");

        let schedule = store.daily_schedule(jan(10)).await;
        assert_eq!(schedule.len(), 4);

        let orphaned = schedule
            .iter()
            .find(|entry| entry.appointment.patient_id == 3)
            .expect("appointment survives its patient");
        assert!(orphaned.patient.is_none());
        assert!(orphaned.doctor.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_doctor_schedule_filters_by_doctor_and_date() {
        let store = fixture_store();
        let schedule = store.doctor_schedule(2, jan(10)).await;

        let ids: Vec<_> = schedule.iter().map(|e| e.appointment.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(schedule.iter().all(|e| e.patient.is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboard_reflects_writes() {
        let store = fixture_store();
        let before = store.dashboard(jan(10)).await;
        assert_eq!(before.total_patients, 5);
        assert_eq!(before.today_appointments, 4);
        assert_eq!(before.in_progress, 1);
        assert_eq!(before.completed, 1);

        store
            .patients()
            .create(PatientPatch {
                name: Some("New Patient".into()),
                ..PatientPatch::default()
            })
            .await
            .expect("create should succeed");

        let after = store.dashboard(jan(10)).await;
        assert_eq!(after.total_patients, 6);
    }

    #[tokio::test]
    async fn test_id_policy_applies_to_every_repository() {
        let cfg = CoreConfig::new(LatencyProfile::instant(), IdPolicy::Monotonic);
        let store = ClinicStore::from_fixture(&cfg).expect("fixture store should build");

        store.doctors().delete(4).await.expect("delete should succeed");
        let doctor = store
            .doctors()
            .create(Default::default())
            .await
            .expect("create should succeed");
        assert_eq!(doctor.id, 5);

        store
            .medical_records()
            .delete(6)
            .await
            .expect("delete should succeed");
        let record = store
            .medical_records()
            .create(Default::default())
            .await
            .expect("create should succeed");
        assert_eq!(record.id, 7);
    }

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let cfg = CoreConfig::new(LatencyProfile::instant(), IdPolicy::MaxPlusOne);
        let first = ClinicStore::from_fixture(&cfg).expect("fixture store should build");
        let second = ClinicStore::from_fixture(&cfg).expect("fixture store should build");

        first.patients().delete(1).await.expect("delete should succeed");

        assert_eq!(first.patients().count().await, 4);
        assert_eq!(second.patients().count().await, 5);
    }
}
