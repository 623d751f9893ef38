//! HTTP surface of the journal service.
//!
//! Every handler receives the same [`JournalState`]; there is no other
//! shared state between requests.

pub mod admissions;
pub mod doctors;
pub mod health;
pub mod patients;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::repository::JournalRepository;

/// Shared state for all routes.
pub type JournalState = Arc<JournalRepository>;

/// Assemble the full API router.
pub fn create_router(repo: JournalState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/Patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/Doctors",
            get(doctors::list_doctors).post(doctors::create_doctor),
        )
        .route("/Admissions", get(admissions::list_admissions))
        .route("/accessPatient", get(patients::access_patient))
        .route(
            "/admissions/:admission_id/doctors/:doctor_id",
            post(admissions::assign_doctor),
        )
        .route("/allPatientsForDoc", get(patients::patients_for_doctor))
        .route("/allDocForPatient", get(doctors::doctors_for_patient))
        .with_state(repo)
}
