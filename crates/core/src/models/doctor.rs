use super::merge_field;
use clinic_types::{EntityId, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-text opening hours per weekday, e.g. `"9:00 AM - 5:00 PM"`.
pub type Availability = BTreeMap<Weekday, String>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub availability: Availability,
}

impl Doctor {
    /// Hours for `day`, if the doctor works that day.
    pub fn hours_on(&self, day: Weekday) -> Option<&str> {
        self.availability
            .get(&day)
            .map(String::as_str)
            .filter(|hours| !hours.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorPatch {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Replaces the whole availability map.
    pub availability: Option<Availability>,
}

impl DoctorPatch {
    pub(crate) fn merge_into(self, doctor: &mut Doctor) {
        merge_field(&mut doctor.name, self.name);
        merge_field(&mut doctor.specialization, self.specialization);
        merge_field(&mut doctor.email, self.email);
        merge_field(&mut doctor.phone, self.phone);
        merge_field(&mut doctor.availability, self.availability);
    }
}
