//! Admission endpoints.
//!
//! Routes:
//! - `GET  /Admissions`                                  : list all admissions
//! - `POST /admissions/:admission_id/doctors/:doctor_id` : assign a doctor

use axum::{
    extract::{Path, State},
    Json,
};

use super::JournalState;
use crate::error::AppError;
use crate::models::Admission;

pub const ADMISSION_OR_DOCTOR_NOT_FOUND: &str = "Admission or doctor not found.";
pub const DOCTOR_ALREADY_ASSIGNED: &str = "Doctor is already assigned to this admission.";

/// `GET /Admissions`: every admission with its patient and doctors.
pub async fn list_admissions(
    State(repo): State<JournalState>,
) -> Result<Json<Vec<Admission>>, AppError> {
    Ok(Json(repo.list_admissions().await?))
}

/// `POST /admissions/:admission_id/doctors/:doctor_id`: append a doctor to
/// the admission and return the updated admission.
///
/// The doctor's department is not compared with the admission's here; the
/// access check does that at read time.
pub async fn assign_doctor(
    State(repo): State<JournalState>,
    Path((admission_id, doctor_id)): Path<(i64, i64)>,
) -> Result<Json<Admission>, AppError> {
    let (admission, doctor) = tokio::try_join!(
        repo.find_admission(admission_id),
        repo.find_doctor(doctor_id),
    )?;

    let (Some(admission), Some(_doctor)) = (admission, doctor) else {
        return Err(AppError::not_found(ADMISSION_OR_DOCTOR_NOT_FOUND));
    };

    if admission.has_doctor(doctor_id) {
        return Err(AppError::bad_request(DOCTOR_ALREADY_ASSIGNED));
    }

    // A concurrent assignment can still win the race; the insert reports it.
    if !repo.add_doctor_to_admission(admission_id, doctor_id).await? {
        return Err(AppError::bad_request(DOCTOR_ALREADY_ASSIGNED));
    }

    tracing::info!("Assigned doctor {} to admission {}", doctor_id, admission_id);

    let updated = repo
        .find_admission(admission_id)
        .await?
        .ok_or_else(|| AppError::not_found(ADMISSION_OR_DOCTOR_NOT_FOUND))?;

    Ok(Json(updated))
}
