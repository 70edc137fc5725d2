//! # Clinic Core
//!
//! Data-access layer for the clinic application.
//!
//! This crate holds four in-memory repositories (patients, doctors, appointments, medical
//! records) seeded from a fixed snapshot, plus the read-only helpers that join them:
//! - Integer id allocation per collection ([`id`])
//! - Simulated network latency on every operation ([`latency`])
//! - Generic CRUD with shallow-merge updates ([`repositories`])
//! - Cross-entity filters and joins ([`queries`], [`store`])
//!
//! **No presentation concerns**: rendering, routing and argument parsing belong in the binary.
//! Nothing here persists to disk; every store starts again from its seed.

pub mod config;
pub mod constants;
pub mod error;
pub mod id;
pub mod latency;
pub mod models;
pub mod queries;
pub mod repositories;
pub mod seed;
pub mod store;

pub use clinic_types::{AppointmentStatus, EntityId, NonEmptyText, TextError, Weekday};
pub use config::{CoreConfig, LatencyProfile};
pub use error::{ClinicError, ClinicResult};
pub use id::IdPolicy;
pub use repositories::{EntityKind, Repository, Versioned};
pub use seed::SeedData;
pub use store::{ClinicStore, PatientOverview, ScheduleEntry};
