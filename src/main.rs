use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::config::{id_policy_from_env_value, latency_from_env_value};
use clinic_core::constants::PRESCRIPTION_TEMPLATES;
use clinic_core::models::{Appointment, Doctor, MedicalRecordPatch, Patient, PrescriptionTemplate};
use clinic_core::queries::{
    appointments_for_doctor, appointments_on, appointments_with_status, distinct_medications,
    doctors_available_on, find_prescription_template, medication_suggestions,
};
use clinic_core::{
    AppointmentStatus, ClinicStore, CoreConfig, EntityId, PatientOverview, ScheduleEntry, Weekday,
};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patients, doctors, appointments and records over an in-memory store")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List patients
    Patients {
        /// Match against name, phone, medical id or email
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one patient with their appointments and medical records
    Patient {
        /// Patient id
        id: EntityId,
    },
    /// List doctors and their weekly availability
    Doctors {
        /// Only doctors working on this day (e.g. monday or mon)
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// List appointments
    Appointments {
        /// scheduled, in-progress, completed or cancelled
        #[arg(long)]
        status: Option<AppointmentStatus>,
        /// Only this doctor's appointments
        #[arg(long)]
        doctor: Option<EntityId>,
        /// Only appointments on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Dashboard figures and the schedule for one day
    Today {
        /// Day to report on (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Medications prescribed across all records
    Medications {
        /// Autocomplete against common and prescribed medications instead
        #[arg(long)]
        search: Option<String>,
        /// List the prescription templates instead
        #[arg(long, conflicts_with = "search")]
        templates: bool,
    },
    /// Write a medical record for a patient
    Prescribe {
        /// Patient id
        patient: EntityId,
        /// Prescribing doctor
        #[arg(long, default_value_t = 1)]
        doctor: EntityId,
        #[arg(long)]
        diagnosis: String,
        #[arg(long)]
        treatment: String,
        /// Prescription template, by id or name
        #[arg(long)]
        template: Option<String>,
        /// Visit date (YYYY-MM-DD); defaults to the local date
        #[arg(long)]
        visit_date: Option<NaiveDate>,
    },
    /// Change the status of an appointment
    SetStatus {
        /// Appointment id
        id: EntityId,
        /// scheduled, in-progress, completed or cancelled
        status: AppointmentStatus,
    },
    /// Delete a patient (their appointments and records are kept)
    DeletePatient {
        /// Patient id
        id: EntityId,
    },
}

/// Appointment with the names it refers to, for listing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentRow {
    #[serde(flatten)]
    appointment: Appointment,
    patient_name: Option<String>,
    doctor_name: Option<String>,
}

/// Entry point for the clinic command-line front end.
///
/// # Environment Variables
/// - `CLINIC_LATENCY_MS`: override the simulated delay of every repository (default: per kind)
/// - `CLINIC_ID_POLICY`: `max-plus-one` (default) or `monotonic`
/// - `RUST_LOG`: tracing filter, on top of `clinic=info`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let latency = latency_from_env_value(std::env::var("CLINIC_LATENCY_MS").ok())?;
    let id_policy = id_policy_from_env_value(std::env::var("CLINIC_ID_POLICY").ok())?;
    let cfg = CoreConfig::new(latency, id_policy);
    tracing::debug!(?cfg, "resolved configuration");
    let store = ClinicStore::from_fixture(&cfg).context("failed to seed clinic store")?;

    run(cli.command, cli.json, &store).await
}

async fn run(command: Commands, json: bool, store: &ClinicStore) -> anyhow::Result<()> {
    match command {
        Commands::Patients { search } => {
            let patients = match search {
                Some(term) => store.patients().search(&term).await,
                None => store.patients().get_all().await,
            };
            if json {
                return print_json(&patients);
            }
            if patients.is_empty() {
                println!("No patients found.");
            }
            for patient in &patients {
                print_patient_line(patient);
            }
        }
        Commands::Patient { id } => {
            let overview = store
                .patient_overview(id)
                .await
                .with_context(|| format!("Patient {id} not found"))?;
            if json {
                return print_json(&overview);
            }
            print_overview(&overview);
        }
        Commands::Doctors { day } => {
            let mut doctors = store.doctors().get_all().await;
            if let Some(day) = day {
                doctors = doctors_available_on(&doctors, day);
            }
            if json {
                return print_json(&doctors);
            }
            if doctors.is_empty() {
                println!("No doctors found.");
            }
            for doctor in &doctors {
                match day {
                    Some(day) => println!(
                        "{:>3}  {:<24} {}",
                        doctor.id,
                        doctor.name,
                        doctor.hours_on(day).unwrap_or_default()
                    ),
                    None => print_doctor(doctor),
                }
            }
        }
        Commands::Appointments {
            status,
            doctor,
            date,
        } => {
            let (appointments, patients, doctors) = tokio::join!(
                store.appointments().get_all(),
                store.patients().get_all(),
                store.doctors().get_all(),
            );

            let mut selected = appointments_with_status(&appointments, status);
            if let Some(doctor_id) = doctor {
                selected = appointments_for_doctor(&selected, doctor_id);
            }
            if let Some(date) = date {
                selected = appointments_on(&selected, date);
            }

            let rows: Vec<AppointmentRow> = selected
                .into_iter()
                .map(|appointment| AppointmentRow {
                    patient_name: patient_name(&patients, appointment.patient_id),
                    doctor_name: doctor_name(&doctors, appointment.doctor_id),
                    appointment,
                })
                .collect();

            if json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                match status {
                    Some(status) => println!("No {status} appointments found."),
                    None => println!("No appointments found."),
                }
            }
            for row in &rows {
                print_appointment_line(
                    &row.appointment,
                    row.patient_name.as_deref(),
                    row.doctor_name.as_deref(),
                );
            }
        }
        Commands::Today { date } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let (stats, schedule) = tokio::join!(store.dashboard(today), store.daily_schedule(today));

            if json {
                return print_json(&serde_json::json!({
                    "date": today,
                    "stats": stats,
                    "schedule": schedule,
                }));
            }

            println!("{}", today.format("%A, %B %d, %Y"));
            println!("  Total patients:       {}", stats.total_patients);
            println!("  Today's appointments: {}", stats.today_appointments);
            println!("  In progress:          {}", stats.in_progress);
            println!("  Completed today:      {}", stats.completed);
            println!();
            if schedule.is_empty() {
                println!("No appointments today.");
            }
            for entry in &schedule {
                print_schedule_entry(entry);
            }
        }
        Commands::Medications { templates: true, .. } => {
            if json {
                return print_json(&PRESCRIPTION_TEMPLATES);
            }
            for template in PRESCRIPTION_TEMPLATES {
                print_template(template);
            }
        }
        Commands::Medications { search, .. } => {
            let records = store.medical_records().get_all().await;
            let medications = match search {
                Some(term) => medication_suggestions(&records, &term),
                None => distinct_medications(&records),
            };
            if json {
                return print_json(&medications);
            }
            for medication in &medications {
                println!("{medication}");
            }
        }
        Commands::Prescribe {
            patient,
            doctor,
            diagnosis,
            treatment,
            template,
            visit_date,
        } => {
            anyhow::ensure!(!diagnosis.trim().is_empty(), "Diagnosis is required");
            anyhow::ensure!(!treatment.trim().is_empty(), "Treatment is required");

            let mut patch = MedicalRecordPatch {
                patient_id: Some(patient),
                doctor_id: Some(doctor),
                visit_date: Some(visit_date.unwrap_or_else(|| chrono::Local::now().date_naive())),
                diagnosis: Some(diagnosis),
                treatment: Some(treatment),
                prescriptions: Some(Vec::new()),
            };
            if let Some(selector) = template {
                let template = find_prescription_template(&selector)
                    .with_context(|| format!("unknown prescription template {selector:?}"))?;
                patch
                    .apply_template(template)
                    .with_context(|| format!("template {} has a blank line", template.name))?;
            }

            let record = store
                .medical_records()
                .create(patch)
                .await
                .context("failed to create medical record")?;
            tracing::info!(id = record.id, patient, "medical record created");
            if json {
                return print_json(&record);
            }
            println!(
                "Created medical record {} for patient {} with {} prescription(s).",
                record.id,
                record.patient_id,
                record.prescriptions.len()
            );
        }
        Commands::SetStatus { id, status } => {
            let appointment = store
                .appointments()
                .set_status(id, status)
                .await
                .with_context(|| format!("failed to update appointment {id}"))?;
            tracing::info!(id, %status, "appointment status changed");
            if json {
                return print_json(&appointment);
            }
            println!("Appointment {} is now {}.", appointment.id, appointment.status);
        }
        Commands::DeletePatient { id } => {
            store
                .patients()
                .delete(id)
                .await
                .with_context(|| format!("failed to delete patient {id}"))?;
            tracing::info!(id, "patient deleted");
            if json {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            println!("Deleted patient {id}.");
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `None` when the appointment points at a patient that no longer exists.
fn patient_name(patients: &[Patient], id: EntityId) -> Option<String> {
    patients.iter().find(|p| p.id == id).map(|p| p.name.clone())
}

fn doctor_name(doctors: &[Doctor], id: EntityId) -> Option<String> {
    doctors.iter().find(|d| d.id == id).map(|d| d.name.clone())
}

fn print_patient_line(patient: &Patient) {
    println!(
        "{:>3}  {:<20} {:<14} {:<16} {}",
        patient.id, patient.name, patient.medical_id, patient.phone, patient.email
    );
}

fn print_overview(overview: &PatientOverview) {
    let patient = &overview.patient;
    println!("{} ({})", patient.name, patient.gender);
    println!("  Medical ID: {}", patient.medical_id);
    println!("  Born:       {}", patient.date_of_birth.format("%b %d, %Y"));
    println!("  Phone:      {}", patient.phone);
    println!("  Email:      {}", or_not_provided(&patient.email));
    println!("  Address:    {}", or_not_provided(&patient.address));

    if !patient.emergency_contact.is_empty() {
        let contact = &patient.emergency_contact;
        println!(
            "  Emergency:  {} ({}), {}",
            contact.name, contact.relation, contact.phone
        );
    }
    if !patient.allergies.is_empty() {
        println!("  Allergies:  {}", patient.allergies.join(", "));
    }
    if !patient.current_medications.is_empty() {
        println!("  Medication: {}", patient.current_medications.join(", "));
    }

    println!();
    println!("Appointment history");
    if overview.appointments.is_empty() {
        println!("  No appointments found for this patient.");
    }
    for appointment in &overview.appointments {
        println!(
            "  {} at {}  {:<12} {}",
            appointment.date.format("%b %d, %Y"),
            appointment.time.format("%H:%M"),
            appointment.status,
            appointment.kind
        );
        if !appointment.notes.is_empty() {
            println!("      {}", appointment.notes);
        }
    }

    println!();
    println!("Medical records");
    if overview.records.is_empty() {
        println!("  No medical records found for this patient.");
    }
    for record in &overview.records {
        println!("  {}  {}", record.visit_date, record.diagnosis);
        if !record.treatment.is_empty() {
            println!("      Treatment: {}", record.treatment);
        }
        for prescription in &record.prescriptions {
            println!(
                "      Rx {} {} for {}",
                prescription.medication, prescription.dosage, prescription.duration
            );
        }
    }
}

fn print_doctor(doctor: &Doctor) {
    println!("{:>3}  {} ({})", doctor.id, doctor.name, doctor.specialization);
    println!("     {}  {}", doctor.email, doctor.phone);
    for (day, hours) in &doctor.availability {
        if !hours.trim().is_empty() {
            println!("     {:<10} {}", day, hours);
        }
    }
}

fn print_template(template: &PrescriptionTemplate) {
    println!("{:>3}  {}", template.id, template.name);
    for line in template.prescriptions {
        println!("     {} {} for {}", line.medication, line.dosage, line.duration);
    }
}

fn print_appointment_line(appointment: &Appointment, patient: Option<&str>, doctor: Option<&str>) {
    println!(
        "{:>3}  {} {}  {:>3} min  {:<12} {:<20} with {:<20} {}",
        appointment.id,
        appointment.date,
        appointment.time.format("%H:%M"),
        appointment.duration,
        appointment.status,
        patient.unwrap_or("Unknown patient"),
        doctor.unwrap_or("Unknown doctor"),
        appointment.kind
    );
}

fn print_schedule_entry(entry: &ScheduleEntry) {
    print_appointment_line(
        &entry.appointment,
        entry.patient.as_ref().map(|p| p.name.as_str()),
        entry.doctor.as_ref().map(|d| d.name.as_str()),
    );
}

fn or_not_provided(value: &str) -> &str {
    if value.trim().is_empty() {
        "Not provided"
    } else {
        value
    }
}
