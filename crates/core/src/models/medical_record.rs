use super::merge_field;
use chrono::NaiveDate;
use clinic_types::{EntityId, NonEmptyText, TextError};
use serde::{Deserialize, Serialize};

/// One line of a prescription. A line without a medication name cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub medication: NonEmptyText,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub duration: String,
}

impl Prescription {
    pub fn new(medication: NonEmptyText, dosage: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            medication,
            dosage: dosage.into(),
            duration: duration.into(),
        }
    }
}

/// One line of a [`PrescriptionTemplate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateLine {
    pub medication: &'static str,
    pub dosage: &'static str,
    pub duration: &'static str,
}

/// A named bundle of prescription lines that a clinician can apply in one step.
///
/// The built-in set is [`PRESCRIPTION_TEMPLATES`](crate::constants::PRESCRIPTION_TEMPLATES).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PrescriptionTemplate {
    pub id: u32,
    pub name: &'static str,
    pub prescriptions: &'static [TemplateLine],
}

impl PrescriptionTemplate {
    /// The template's lines as prescriptions, in template order.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if a line has a blank medication name.
    pub fn to_prescriptions(&self) -> Result<Vec<Prescription>, TextError> {
        self.prescriptions
            .iter()
            .map(|line| {
                Ok(Prescription::new(
                    NonEmptyText::new(line.medication)?,
                    line.dosage,
                    line.duration,
                ))
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    #[serde(rename = "Id")]
    pub id: EntityId,
    pub patient_id: EntityId,
    pub visit_date: NaiveDate,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    pub doctor_id: EntityId,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

impl MedicalRecord {
    pub fn medications(&self) -> impl Iterator<Item = &str> {
        self.prescriptions.iter().map(|p| p.medication.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordPatch {
    pub patient_id: Option<EntityId>,
    pub visit_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub doctor_id: Option<EntityId>,
    /// Replaces the whole prescription list.
    pub prescriptions: Option<Vec<Prescription>>,
}

impl MedicalRecordPatch {
    /// Replaces the patch's prescription list with the lines of `template`.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if a template line has a blank medication name.
    pub fn apply_template(&mut self, template: &PrescriptionTemplate) -> Result<(), TextError> {
        self.prescriptions = Some(template.to_prescriptions()?);
        Ok(())
    }

    pub(crate) fn merge_into(self, record: &mut MedicalRecord) {
        merge_field(&mut record.patient_id, self.patient_id);
        merge_field(&mut record.visit_date, self.visit_date);
        merge_field(&mut record.diagnosis, self.diagnosis);
        merge_field(&mut record.treatment, self.treatment);
        merge_field(&mut record.doctor_id, self.doctor_id);
        merge_field(&mut record.prescriptions, self.prescriptions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PRESCRIPTION_TEMPLATES;

    #[test]
    fn test_apply_template_replaces_prescription_lines() {
        let template = PRESCRIPTION_TEMPLATES
            .iter()
            .find(|t| t.name == "Diabetes Management")
            .expect("template should exist");

        let mut patch = MedicalRecordPatch {
            diagnosis: Some("Type 2 diabetes".into()),
            prescriptions: Some(vec![Prescription::new(
                NonEmptyText::new("Aspirin").unwrap(),
                "81mg daily",
                "30 days",
            )]),
            ..MedicalRecordPatch::default()
        };
        patch.apply_template(template).expect("template should apply");

        let lines: Vec<(&str, &str, &str)> = patch
            .prescriptions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|p| (p.medication.as_str(), p.dosage.as_str(), p.duration.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![
                ("Metformin", "500mg twice daily", "90 days"),
                ("Glipizide", "5mg daily", "90 days"),
            ]
        );
        assert_eq!(patch.diagnosis.as_deref(), Some("Type 2 diabetes"));
    }

    #[test]
    fn test_template_with_blank_medication_is_rejected() {
        let template = PrescriptionTemplate {
            id: 99,
            name: "Broken",
            prescriptions: &[TemplateLine {
                medication: "  ",
                dosage: "1 daily",
                duration: "7 days",
            }],
        };
        assert!(matches!(template.to_prescriptions(), Err(TextError::Empty)));
    }

    #[test]
    fn test_built_in_templates_are_valid() {
        assert_eq!(PRESCRIPTION_TEMPLATES.len(), 5);
        for template in PRESCRIPTION_TEMPLATES {
            let prescriptions = template.to_prescriptions().expect("built-in lines are named");
            assert_eq!(prescriptions.len(), 2, "{} has two lines", template.name);
        }
    }
}
