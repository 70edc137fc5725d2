//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store. Parsing
//! helpers take the raw value (usually read from the environment by the binary) instead of
//! reading process-wide environment variables themselves, which keeps tests isolated.

use crate::constants::{
    APPOINTMENT_LATENCY, DOCTOR_LATENCY, MEDICAL_RECORD_LATENCY, PATIENT_LATENCY,
};
use crate::id::IdPolicy;
use crate::repositories::EntityKind;
use crate::{ClinicError, ClinicResult};
use std::time::Duration;

/// Artificial delay applied to each entity kind's operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatencyProfile {
    pub patients: Duration,
    pub doctors: Duration,
    pub appointments: Duration,
    pub medical_records: Duration,
}

impl LatencyProfile {
    /// The same delay for every entity kind.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            patients: delay,
            doctors: delay,
            appointments: delay,
            medical_records: delay,
        }
    }

    /// No delay at all. Useful for scripted use and tests that do not exercise timing.
    pub fn instant() -> Self {
        Self::uniform(Duration::ZERO)
    }

    pub fn for_kind(&self, kind: EntityKind) -> Duration {
        match kind {
            EntityKind::Patient => self.patients,
            EntityKind::Doctor => self.doctors,
            EntityKind::Appointment => self.appointments,
            EntityKind::MedicalRecord => self.medical_records,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self {
            patients: PATIENT_LATENCY,
            doctors: DOCTOR_LATENCY,
            appointments: APPOINTMENT_LATENCY,
            medical_records: MEDICAL_RECORD_LATENCY,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    latency: LatencyProfile,
    id_policy: IdPolicy,
}

impl CoreConfig {
    pub fn new(latency: LatencyProfile, id_policy: IdPolicy) -> Self {
        Self { latency, id_policy }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }
}

/// Parse a latency override in milliseconds.
///
/// `None` or a blank value keeps the per-kind defaults. Any other value must be a non-negative
/// integer and is applied to all four entity kinds.
pub fn latency_from_env_value(value: Option<String>) -> ClinicResult<LatencyProfile> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(LatencyProfile::default()),
        Some(v) => {
            let millis = v.parse::<u64>().map_err(|_| {
                ClinicError::InvalidInput(format!(
                    "latency must be a whole number of milliseconds, got {v:?}"
                ))
            })?;
            Ok(LatencyProfile::uniform(Duration::from_millis(millis)))
        }
    }
}

/// Parse the id allocation policy.
///
/// If `value` is `None` or blank, returns the default policy.
pub fn id_policy_from_env_value(value: Option<String>) -> ClinicResult<IdPolicy> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<IdPolicy>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
