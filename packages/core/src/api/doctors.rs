//! Doctor endpoints.
//!
//! Routes:
//! - `POST /Doctors`                      : register a doctor
//! - `GET  /Doctors`                      : list all doctors
//! - `GET  /allDocForPatient?patientID=`  : doctors on a patient's admission

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::patients::PATIENT_NOT_FOUND;
use super::JournalState;
use crate::error::AppError;
use crate::models::{Doctor, NewDoctor};

#[derive(Debug, Deserialize)]
pub struct PatientIdQuery {
    #[serde(rename = "patientID")]
    pub patient_id: i64,
}

/// `POST /Doctors`: insert a doctor. Responds 200 with an empty body.
pub async fn create_doctor(
    State(repo): State<JournalState>,
    Json(body): Json<NewDoctor>,
) -> Result<StatusCode, AppError> {
    let id = repo.insert_doctor(&body).await?;
    tracing::info!("Created doctor {} in {}", id, body.department);
    Ok(StatusCode::OK)
}

pub async fn list_doctors(State(repo): State<JournalState>) -> Result<Json<Vec<Doctor>>, AppError> {
    Ok(Json(repo.list_doctors().await?))
}

/// `GET /allDocForPatient`: 404 when the patient has no admission.
pub async fn doctors_for_patient(
    State(repo): State<JournalState>,
    Query(params): Query<PatientIdQuery>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let admission = repo
        .find_admission_for_patient(params.patient_id)
        .await?
        .ok_or_else(|| AppError::not_found(PATIENT_NOT_FOUND))?;

    Ok(Json(admission.doctors))
}
