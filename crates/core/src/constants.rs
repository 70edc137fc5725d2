//! Constants used throughout the clinic core crate.
//!
//! Latency defaults and fixture sources live here so every repository is configured from one
//! place.

use crate::models::{PrescriptionTemplate, TemplateLine};
use std::time::Duration;

/// Simulated round-trip for patient operations.
pub const PATIENT_LATENCY: Duration = Duration::from_millis(300);

/// Simulated round-trip for doctor operations.
pub const DOCTOR_LATENCY: Duration = Duration::from_millis(200);

/// Simulated round-trip for appointment operations.
pub const APPOINTMENT_LATENCY: Duration = Duration::from_millis(250);

/// Simulated round-trip for medical record operations.
pub const MEDICAL_RECORD_LATENCY: Duration = Duration::from_millis(300);

/// Appointment length used when a new appointment does not specify one.
pub const DEFAULT_APPOINTMENT_MINUTES: u32 = 30;

/// Appointment type used when a new appointment does not specify one.
pub const DEFAULT_APPOINTMENT_TYPE: &str = "Consultation";

/// Seed fixture for the patient repository.
pub const PATIENTS_FIXTURE: &str = include_str!("../fixtures/patients.json");

/// Seed fixture for the doctor repository.
pub const DOCTORS_FIXTURE: &str = include_str!("../fixtures/doctors.json");

/// Seed fixture for the appointment repository.
pub const APPOINTMENTS_FIXTURE: &str = include_str!("../fixtures/appointments.json");

/// Seed fixture for the medical record repository.
pub const MEDICAL_RECORDS_FIXTURE: &str = include_str!("../fixtures/medical_records.json");

/// Medications offered by prescription autocomplete before any have been prescribed.
pub const COMMON_MEDICATIONS: &[&str] = &[
    "Lisinopril",
    "Amlodipine",
    "Metformin",
    "Atorvastatin",
    "Omeprazole",
    "Levothyroxine",
    "Albuterol inhaler",
    "Prednisone",
    "Ibuprofen",
    "Acetaminophen",
    "Amoxicillin",
    "Azithromycin",
    "Hydrochlorothiazide",
    "Losartan",
    "Gabapentin",
    "Sertraline",
    "Escitalopram",
    "Pantoprazole",
    "Vitamin D3",
    "Prenatal vitamins",
    "Aspirin",
    "Clopidogrel",
    "Warfarin",
    "Insulin",
    "Glipizide",
    "Furosemide",
    "Carvedilol",
    "Simvastatin",
];

/// Prescription bundles offered when writing a new medical record.
pub const PRESCRIPTION_TEMPLATES: &[PrescriptionTemplate] = &[
    PrescriptionTemplate {
        id: 1,
        name: "Hypertension Standard",
        prescriptions: &[
            TemplateLine {
                medication: "Lisinopril",
                dosage: "10mg daily",
                duration: "90 days",
            },
            TemplateLine {
                medication: "Amlodipine",
                dosage: "5mg daily",
                duration: "90 days",
            },
        ],
    },
    PrescriptionTemplate {
        id: 2,
        name: "Diabetes Management",
        prescriptions: &[
            TemplateLine {
                medication: "Metformin",
                dosage: "500mg twice daily",
                duration: "90 days",
            },
            TemplateLine {
                medication: "Glipizide",
                dosage: "5mg daily",
                duration: "90 days",
            },
        ],
    },
    PrescriptionTemplate {
        id: 3,
        name: "Respiratory Care",
        prescriptions: &[
            TemplateLine {
                medication: "Albuterol inhaler",
                dosage: "2 puffs every 4-6 hours as needed",
                duration: "30 days",
            },
            TemplateLine {
                medication: "Prednisone",
                dosage: "20mg daily for 5 days",
                duration: "5 days",
            },
        ],
    },
    PrescriptionTemplate {
        id: 4,
        name: "Pain Management",
        prescriptions: &[
            TemplateLine {
                medication: "Ibuprofen",
                dosage: "400mg every 6 hours as needed",
                duration: "14 days",
            },
            TemplateLine {
                medication: "Acetaminophen",
                dosage: "650mg every 6 hours as needed",
                duration: "14 days",
            },
        ],
    },
    PrescriptionTemplate {
        id: 5,
        name: "Cholesterol Treatment",
        prescriptions: &[
            TemplateLine {
                medication: "Atorvastatin",
                dosage: "20mg daily",
                duration: "90 days",
            },
            TemplateLine {
                medication: "Omega-3",
                dosage: "1000mg daily",
                duration: "90 days",
            },
        ],
    },
];
