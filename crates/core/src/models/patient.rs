use super::{merge_field, merge_set};
use chrono::NaiveDate;
use clinic_types::EntityId;
use serde::{Deserialize, Serialize};

/// Person to call in an emergency. Replaced as a whole on update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub relation: String,
}

impl EmergencyContact {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    /// Distinct entries in the order first given.
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub current_medications: Vec<String>,
    #[serde(default)]
    pub emergency_contact: EmergencyContact,
    /// Display identifier printed on cards and searched by staff, e.g. `MED-2024-001`.
    #[serde(default)]
    pub medical_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientPatch {
    pub name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub allergies: Option<Vec<String>>,
    pub current_medications: Option<Vec<String>>,
    pub emergency_contact: Option<EmergencyContact>,
    pub medical_id: Option<String>,
}

impl PatientPatch {
    pub(crate) fn merge_into(self, patient: &mut Patient) {
        merge_field(&mut patient.name, self.name);
        merge_field(&mut patient.date_of_birth, self.date_of_birth);
        merge_field(&mut patient.gender, self.gender);
        merge_field(&mut patient.phone, self.phone);
        merge_field(&mut patient.email, self.email);
        merge_field(&mut patient.address, self.address);
        merge_set(&mut patient.allergies, self.allergies);
        merge_set(&mut patient.current_medications, self.current_medications);
        merge_field(&mut patient.emergency_contact, self.emergency_contact);
        merge_field(&mut patient.medical_id, self.medical_id);
    }
}
