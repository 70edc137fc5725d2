//! Cross-entity query helpers.
//!
//! Pure functions over collections already fetched from the repositories. Every call is a fresh
//! linear scan: there is no index and no cache, so results always reflect the slices passed in.
//! Foreign keys are compared by value only; a dangling id simply matches nothing.

use crate::constants::{COMMON_MEDICATIONS, PRESCRIPTION_TEMPLATES};
use crate::models::{Appointment, Doctor, MedicalRecord, Patient, PrescriptionTemplate};
use chrono::NaiveDate;
use clinic_types::{AppointmentStatus, EntityId, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;

pub fn appointments_for_patient(appointments: &[Appointment], patient_id: EntityId) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.patient_id == patient_id)
        .cloned()
        .collect()
}

pub fn appointments_for_doctor(appointments: &[Appointment], doctor_id: EntityId) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id)
        .cloned()
        .collect()
}

/// A doctor's appointments on `today`.
pub fn appointments_for_doctor_on(
    appointments: &[Appointment],
    doctor_id: EntityId,
    today: NaiveDate,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id && a.date == today)
        .cloned()
        .collect()
}

pub fn appointments_on(appointments: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect()
}

/// Appointments in `status`, or all of them when `status` is `None`.
pub fn appointments_with_status(
    appointments: &[Appointment],
    status: Option<AppointmentStatus>,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| status.map_or(true, |s| a.status == s))
        .cloned()
        .collect()
}

pub fn records_for_patient(records: &[MedicalRecord], patient_id: EntityId) -> Vec<MedicalRecord> {
    records
        .iter()
        .filter(|r| r.patient_id == patient_id)
        .cloned()
        .collect()
}

/// Every medication prescribed in any record, deduplicated and sorted by byte order
/// (so `"Zinc"` sorts before `"aspirin"`).
pub fn distinct_medications(records: &[MedicalRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(MedicalRecord::medications)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Autocomplete candidates for a prescription line.
///
/// Matches `term` case-insensitively against the built-in common medications and every
/// medication already prescribed. A blank term yields nothing.
pub fn medication_suggestions(records: &[MedicalRecord], term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    COMMON_MEDICATIONS
        .iter()
        .copied()
        .chain(records.iter().flat_map(MedicalRecord::medications))
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Looks up a built-in prescription template by numeric id or by name, ignoring case.
pub fn find_prescription_template(selector: &str) -> Option<&'static PrescriptionTemplate> {
    let selector = selector.trim();
    match selector.parse::<u32>() {
        Ok(id) => PRESCRIPTION_TEMPLATES.iter().find(|t| t.id == id),
        Err(_) => PRESCRIPTION_TEMPLATES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(selector)),
    }
}

/// Doctors with non-blank hours on `day`, in collection order.
pub fn doctors_available_on(doctors: &[Doctor], day: Weekday) -> Vec<Doctor> {
    doctors
        .iter()
        .filter(|d| d.hours_on(day).is_some())
        .cloned()
        .collect()
}

/// Patients matching a free-text search.
///
/// Name, medical id and email match case-insensitively; phone numbers match as typed. A blank
/// term returns every patient.
pub fn search_patients(patients: &[Patient], term: &str) -> Vec<Patient> {
    let raw = term.trim();
    if raw.is_empty() {
        return patients.to_vec();
    }
    let needle = raw.to_lowercase();

    patients
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.phone.contains(raw)
                || p.medical_id.to_lowercase().contains(&needle)
                || p.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Headline figures for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub today_appointments: usize,
    pub in_progress: usize,
    pub completed: usize,
}

pub fn dashboard_stats(patients: &[Patient], appointments: &[Appointment], today: NaiveDate) -> DashboardStats {
    let todays = appointments.iter().filter(|a| a.date == today);
    let mut stats = DashboardStats {
        total_patients: patients.len(),
        ..DashboardStats::default()
    };

    for appointment in todays {
        stats.today_appointments += 1;
        match appointment.status {
            AppointmentStatus::InProgress => stats.in_progress += 1,
            AppointmentStatus::Completed => stats.completed += 1,
            AppointmentStatus::Scheduled | AppointmentStatus::Cancelled => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Prescription};
    use clinic_types::NonEmptyText;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(id: EntityId, patient_id: EntityId, doctor_id: EntityId, on: NaiveDate) -> Appointment {
        Appointment {
            id,
            patient_id,
            doctor_id,
            date: on,
            ..Appointment::default()
        }
    }

    fn record(id: EntityId, patient_id: EntityId, medications: &[&str]) -> MedicalRecord {
        MedicalRecord {
            id,
            patient_id,
            doctor_id: 1,
            visit_date: date(2024, 1, 2),
            prescriptions: medications
                .iter()
                .map(|m| Prescription::new(NonEmptyText::new(m).unwrap(), "", ""))
                .collect(),
            ..MedicalRecord::default()
        }
    }

    fn patient(id: EntityId, name: &str, phone: &str, medical_id: &str, email: &str) -> Patient {
        Patient {
            id,
            name: name.into(),
            phone: phone.into(),
            medical_id: medical_id.into(),
            email: email.into(),
            ..Patient::default()
        }
    }

    #[test]
    fn test_appointments_for_doctor_on_returns_only_match() {
        let today = date(2024, 1, 10);
        let appointments = vec![
            appointment(1, 1, 5, today),
            appointment(2, 2, 5, date(2024, 1, 11)),
            appointment(3, 3, 4, today),
        ];

        let found = appointments_for_doctor_on(&appointments, 5, today);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn test_appointments_for_patient_and_doctor() {
        let day = date(2024, 1, 10);
        let appointments = vec![
            appointment(1, 1, 5, day),
            appointment(2, 2, 5, day),
            appointment(3, 1, 4, day),
        ];

        let ids = |found: Vec<Appointment>| found.into_iter().map(|a| a.id).collect::<Vec<_>>();
        assert_eq!(ids(appointments_for_patient(&appointments, 1)), vec![1, 3]);
        assert_eq!(ids(appointments_for_doctor(&appointments, 5)), vec![1, 2]);
        assert!(appointments_for_patient(&appointments, 99).is_empty());
    }

    #[test]
    fn test_appointments_with_status_none_means_all() {
        let day = date(2024, 1, 10);
        let mut cancelled = appointment(2, 1, 1, day);
        cancelled.status = AppointmentStatus::Cancelled;
        let appointments = vec![appointment(1, 1, 1, day), cancelled];

        assert_eq!(appointments_with_status(&appointments, None).len(), 2);
        let only = appointments_with_status(&appointments, Some(AppointmentStatus::Cancelled));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].id, 2);
    }

    #[test]
    fn test_distinct_medications_sorted_case_sensitive() {
        let records = vec![
            record(1, 1, &["Metformin", "aspirin"]),
            record(2, 2, &["Lisinopril", "Metformin"]),
            record(3, 1, &[]),
        ];

        assert_eq!(
            distinct_medications(&records),
            vec!["Lisinopril", "Metformin", "aspirin"]
        );
        assert!(distinct_medications(&[]).is_empty());
    }

    #[test]
    fn test_medication_suggestions_merge_common_and_prescribed() {
        let records = vec![record(1, 1, &["Metoprolol"])];
        let found = medication_suggestions(&records, "met");
        assert_eq!(found, vec!["Metformin", "Metoprolol"]);
        assert!(medication_suggestions(&records, "  ").is_empty());
    }

    #[test]
    fn test_records_for_patient() {
        let records = vec![record(1, 1, &[]), record(2, 2, &[]), record(3, 1, &[])];
        let found = records_for_patient(&records, 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[test]
    fn test_search_patients_fields() {
        let patients = vec![
            patient(1, "Sarah Johnson", "(555) 123-4567", "MED-2024-001", "sarah@email.com"),
            patient(2, "Robert Chen", "(555) 987-6543", "MED-2024-002", "rchen@email.com"),
        ];

        assert_eq!(search_patients(&patients, "JOHNSON").len(), 1);
        assert_eq!(search_patients(&patients, "987-65")[0].id, 2);
        assert_eq!(search_patients(&patients, "med-2024").len(), 2);
        assert_eq!(search_patients(&patients, "RCHEN@")[0].id, 2);
        assert_eq!(search_patients(&patients, "").len(), 2);
        assert!(search_patients(&patients, "zzz").is_empty());
    }

    #[test]
    fn test_dashboard_stats_counts_today_only() {
        let today = date(2024, 1, 10);
        let mut in_progress = appointment(2, 1, 1, today);
        in_progress.status = AppointmentStatus::InProgress;
        let mut completed = appointment(3, 2, 1, today);
        completed.status = AppointmentStatus::Completed;
        let mut yesterday = appointment(4, 2, 1, date(2024, 1, 9));
        yesterday.status = AppointmentStatus::Completed;

        let appointments = vec![appointment(1, 1, 1, today), in_progress, completed, yesterday];
        let patients = vec![patient(1, "A", "", "", ""), patient(2, "B", "", "", "")];

        assert_eq!(
            dashboard_stats(&patients, &appointments, today),
            DashboardStats {
                total_patients: 2,
                today_appointments: 3,
                in_progress: 1,
                completed: 1,
            }
        );
    }

    #[test]
    fn test_find_prescription_template_by_id_or_name() {
        let by_id = find_prescription_template("3").expect("template 3 should exist");
        assert_eq!(by_id.name, "Respiratory Care");

        let by_name = find_prescription_template("pain management").expect("name should match");
        assert_eq!(by_name.id, 4);

        assert!(find_prescription_template("9").is_none());
        assert!(find_prescription_template("Vitamins").is_none());
    }

    #[test]
    fn test_doctors_available_on_skips_blank_hours() {
        let availability = |day: Weekday, hours: &str| -> Availability {
            [(day, hours.to_string())].into_iter().collect()
        };
        let doctors = vec![
            Doctor {
                id: 1,
                availability: availability(Weekday::Monday, "9:00 AM - 5:00 PM"),
                ..Doctor::default()
            },
            Doctor {
                id: 2,
                availability: availability(Weekday::Monday, "  "),
                ..Doctor::default()
            },
            Doctor {
                id: 3,
                availability: availability(Weekday::Tuesday, "8:00 AM - 4:00 PM"),
                ..Doctor::default()
            },
        ];

        let ids: Vec<EntityId> = doctors_available_on(&doctors, Weekday::Monday)
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![1]);
        assert!(doctors_available_on(&doctors, Weekday::Sunday).is_empty());
    }
}
