use super::merge_field;
use crate::constants::{DEFAULT_APPOINTMENT_MINUTES, DEFAULT_APPOINTMENT_TYPE};
use chrono::{NaiveDate, NaiveTime};
use clinic_types::{AppointmentStatus, EntityId};
use serde::{Deserialize, Serialize};

/// A booked slot between a patient and a doctor.
///
/// `patient_id` and `doctor_id` are not checked against their repositories; an appointment can
/// outlive the patient or doctor it refers to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub patient_id: EntityId,
    pub doctor_id: EntityId,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    /// Length in minutes.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
}

impl Default for Appointment {
    fn default() -> Self {
        Self {
            id: 0,
            patient_id: 0,
            doctor_id: 0,
            date: NaiveDate::default(),
            time: NaiveTime::default(),
            duration: DEFAULT_APPOINTMENT_MINUTES,
            kind: DEFAULT_APPOINTMENT_TYPE.to_owned(),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_id: Option<EntityId>,
    pub doctor_id: Option<EntityId>,
    pub date: Option<NaiveDate>,
    #[serde(default, with = "clock_time::option")]
    pub time: Option<NaiveTime>,
    pub duration: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl AppointmentPatch {
    pub fn status(status: AppointmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub(crate) fn merge_into(self, appointment: &mut Appointment) {
        merge_field(&mut appointment.patient_id, self.patient_id);
        merge_field(&mut appointment.doctor_id, self.doctor_id);
        merge_field(&mut appointment.date, self.date);
        merge_field(&mut appointment.time, self.time);
        merge_field(&mut appointment.duration, self.duration);
        merge_field(&mut appointment.kind, self.kind);
        merge_field(&mut appointment.status, self.status);
        merge_field(&mut appointment.notes, self.notes);
    }
}

/// `HH:MM` wall-clock serialisation for appointment times.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::{Deserialize, Deserializer};

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|raw| {
                NaiveTime::parse_from_str(raw.trim(), super::FORMAT)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}
