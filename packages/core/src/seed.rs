//! Startup sample data.
//!
//! Each table is seeded only while it is empty. The check looks at row
//! counts, not content, so a run that stopped half-way is not repaired.

use crate::models::{NewDoctor, NewPatient};
use crate::repository::JournalRepository;

const SAMPLE_DOCTORS: &[(&str, &str)] = &[
    ("Dr. Test", "Cardiology"),
    ("Dr. Test2", "Neurology"),
    ("Dr. Test3", "Pediatrics"),
];

const SAMPLE_PATIENTS: &[(&str, &str)] = &[
    ("Sir Test McTest", "1234567890"),
    ("Mrs Test McTest", "2345678901"),
    ("Mr Test", "3456789012"),
];

/// Department paired with the SSN of the admitted patient.
const SAMPLE_ADMISSIONS: &[(&str, &str)] = &[
    ("Cardiology", "1234567890"),
    ("Neurology", "2345678901"),
    ("Pediatrics", "3456789012"),
];

/// Rows inserted by a single [`seed_sample_data`] run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub doctors: usize,
    pub patients: usize,
    pub admissions: usize,
}

/// Insert the sample doctors, patients and admissions into empty tables.
pub async fn seed_sample_data(repo: &JournalRepository) -> Result<SeedReport, sqlx::Error> {
    let mut report = SeedReport::default();

    if repo.count_doctors().await? == 0 {
        for (name, department) in SAMPLE_DOCTORS {
            repo.insert_doctor(&NewDoctor {
                name: name.to_string(),
                department: department.to_string(),
            })
            .await?;
            report.doctors += 1;
        }
    }

    if repo.count_patients().await? == 0 {
        for (name, ssn) in SAMPLE_PATIENTS {
            repo.insert_patient(&NewPatient {
                name: name.to_string(),
                social_security_number: ssn.to_string(),
            })
            .await?;
            report.patients += 1;
        }
    }

    if repo.count_admissions().await? == 0 {
        for (department, ssn) in SAMPLE_ADMISSIONS {
            let Some(patient) = repo.find_patient_by_ssn(ssn).await? else {
                tracing::warn!(
                    "No patient with SSN {}; skipping {} admission",
                    ssn,
                    department
                );
                continue;
            };

            let doctor_ids: Vec<i64> = repo
                .find_doctors_by_department(department)
                .await?
                .iter()
                .map(|d| d.doctor_id)
                .collect();

            repo.insert_admission(department, patient.patient_id, &doctor_ids)
                .await?;
            report.admissions += 1;
        }
    }

    tracing::info!(
        "Seeded {} doctors, {} patients, {} admissions",
        report.doctors,
        report.patients,
        report.admissions
    );

    Ok(report)
}
