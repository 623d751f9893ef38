//! Patient endpoints and the journal access check.
//!
//! Routes:
//! - `POST /Patients`                               : register a patient
//! - `GET  /Patients`                               : list all patients
//! - `GET  /allPatientsForDoc?doctorID=`            : patients of a doctor
//! - `GET  /accessPatient?patientID=&doctorID=`     : journal access check

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::JournalState;
use crate::error::AppError;
use crate::models::{has_journal_access, NewPatient, Patient};
use crate::repository::AdmissionFilter;

pub const ACCESS_GRANTED: &str = "Doctor has access to the patient's medical journal.";
pub const ACCESS_DENIED: &str = "Doctor does not have access to the patient's medical journal.";
pub const PATIENT_NOT_FOUND: &str = "Patient not found.";
pub const DOCTOR_NOT_FOUND: &str = "Doctor not found.";

// ---- Request / response shapes ----

#[derive(Debug, Deserialize)]
pub struct DoctorIdQuery {
    #[serde(rename = "doctorID")]
    pub doctor_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct AccessQuery {
    #[serde(rename = "patientID")]
    pub patient_id: i64,
    #[serde(rename = "doctorID")]
    pub doctor_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessResponse {
    pub message: String,
    pub medical_journal: Patient,
}

// ---- Handlers ----

/// `POST /Patients`: insert a patient. Responds 200 with an empty body.
pub async fn create_patient(
    State(repo): State<JournalState>,
    Json(body): Json<NewPatient>,
) -> Result<StatusCode, AppError> {
    let id = repo.insert_patient(&body).await?;
    tracing::info!("Created patient {}", id);
    Ok(StatusCode::OK)
}

/// `GET /Patients`
pub async fn list_patients(
    State(repo): State<JournalState>,
) -> Result<Json<Vec<Patient>>, AppError> {
    Ok(Json(repo.list_patients().await?))
}

/// `GET /allPatientsForDoc`: the patient of every admission the doctor is
/// assigned to. An unknown doctor simply has no patients.
pub async fn patients_for_doctor(
    State(repo): State<JournalState>,
    Query(params): Query<DoctorIdQuery>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let patients = repo
        .find_admissions(AdmissionFilter::Doctor(params.doctor_id))
        .await?
        .into_iter()
        .map(|admission| admission.medical_journal)
        .collect();

    Ok(Json(patients))
}

/// `GET /accessPatient`: return the patient's journal if the doctor is
/// assigned to the patient's admission and shares its department.
///
/// A patient without an admission counts as not found.
pub async fn access_patient(
    State(repo): State<JournalState>,
    Query(params): Query<AccessQuery>,
) -> Result<Json<AccessResponse>, AppError> {
    let admission = repo
        .find_admission_for_patient(params.patient_id)
        .await?
        .ok_or_else(|| AppError::not_found(PATIENT_NOT_FOUND))?;

    let doctor = repo
        .find_doctor(params.doctor_id)
        .await?
        .ok_or_else(|| AppError::not_found(DOCTOR_NOT_FOUND))?;

    if !has_journal_access(&admission, &doctor) {
        tracing::info!(
            "Denied journal access: doctor {} -> patient {}",
            doctor.doctor_id,
            params.patient_id
        );
        return Err(AppError::forbidden(ACCESS_DENIED));
    }

    Ok(Json(AccessResponse {
        message: ACCESS_GRANTED.to_string(),
        medical_journal: admission.medical_journal,
    }))
}
