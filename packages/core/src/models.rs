//! Journal records and the journal access rule.
//!
//! Field names serialise in camelCase (`doctorId`, `socialSecurityNumber`,
//! `medicalJournal`) which is the wire format clients already depend on.

use serde::{Deserialize, Serialize};

/// A doctor working in a single department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub doctor_id: i64,
    pub name: String,
    pub department: String,
}

/// A patient. The patient record doubles as the medical journal handed to
/// authorised doctors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: i64,
    pub name: String,
    pub social_security_number: String,
}

/// A hospital stay: one patient, one department, the doctors treating them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admission {
    pub admission_id: i64,
    pub department: String,
    /// Assigned doctors, in assignment order.
    pub doctors: Vec<Doctor>,
    pub medical_journal: Patient,
}

impl Admission {
    pub fn has_doctor(&self, doctor_id: i64) -> bool {
        self.doctors.iter().any(|d| d.doctor_id == doctor_id)
    }
}

/// Body of `POST /Doctors`. Identifiers are always assigned by the database.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub department: String,
}

/// Body of `POST /Patients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub social_security_number: String,
}

/// A doctor may read a patient's journal only when assigned to the patient's
/// admission and working in the admission's department.
///
/// Department comparison is exact. Admission departments are not checked
/// against their doctors on write, so both halves of the rule are needed.
pub fn has_journal_access(admission: &Admission, doctor: &Doctor) -> bool {
    admission.has_doctor(doctor.doctor_id) && admission.department == doctor.department
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn doctor(id: i64, department: &str) -> Doctor {
        Doctor {
            doctor_id: id,
            name: format!("Dr. {}", id),
            department: department.to_string(),
        }
    }

    fn admission(department: &str, doctors: Vec<Doctor>) -> Admission {
        Admission {
            admission_id: 1,
            department: department.to_string(),
            doctors,
            medical_journal: Patient {
                patient_id: 1,
                name: "Sir Test McTest".to_string(),
                social_security_number: "1234567890".to_string(),
            },
        }
    }

    #[test]
    fn assigned_doctor_in_same_department_has_access() {
        let cardiologist = doctor(1, "Cardiology");
        let stay = admission("Cardiology", vec![cardiologist.clone()]);
        assert!(has_journal_access(&stay, &cardiologist));
    }

    #[test]
    fn unassigned_doctor_is_denied() {
        let stay = admission("Cardiology", vec![doctor(1, "Cardiology")]);
        assert!(!has_journal_access(&stay, &doctor(2, "Cardiology")));
    }

    #[test]
    fn assigned_doctor_from_other_department_is_denied() {
        let neurologist = doctor(2, "Neurology");
        let stay = admission("Cardiology", vec![doctor(1, "Cardiology"), neurologist.clone()]);
        assert!(!has_journal_access(&stay, &neurologist));
    }

    #[test]
    fn department_comparison_is_case_sensitive() {
        let cardiologist = doctor(1, "cardiology");
        let stay = admission("Cardiology", vec![cardiologist.clone()]);
        assert!(!has_journal_access(&stay, &cardiologist));
    }

    #[test]
    fn admission_serialises_camel_case() {
        let stay = admission("Cardiology", vec![doctor(1, "Cardiology")]);
        let json = serde_json::to_value(&stay).unwrap();
        assert_eq!(json["admissionId"], 1);
        assert_eq!(json["doctors"][0]["doctorId"], 1);
        assert_eq!(json["medicalJournal"]["socialSecurityNumber"], "1234567890");
    }

    #[test]
    fn new_patient_ignores_client_supplied_id() {
        let body = r#"{"patientId":42,"name":"Mr Test","socialSecurityNumber":"3456789012"}"#;
        let payload: NewPatient = serde_json::from_str(body).unwrap();
        assert_eq!(payload.name, "Mr Test");
        assert_eq!(payload.social_security_number, "3456789012");
    }

    fn department_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["Cardiology", "Neurology", "Pediatrics", "Oncology"])
            .prop_map(|s| s.to_string())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn access_requires_membership_and_matching_department(
            admission_department in department_strategy(),
            doctor_department in department_strategy(),
            assigned_ids in prop::collection::btree_set(1i64..20, 0..6),
            doctor_id in 1i64..20,
        ) {
            let doctors = assigned_ids
                .iter()
                .map(|id| doctor(*id, &admission_department))
                .collect();
            let stay = admission(&admission_department, doctors);
            let candidate = doctor(doctor_id, &doctor_department);

            let expected = assigned_ids.contains(&doctor_id)
                && admission_department == doctor_department;
            prop_assert_eq!(has_journal_access(&stay, &candidate), expected);
        }
    }
}
