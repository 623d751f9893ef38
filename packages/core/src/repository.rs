//! Database repository for journal data.
//!
//! All SQLite read/write logic lives here. Handlers receive an
//! `Arc<JournalRepository>` as router state and never touch SQL directly.
//!
//! Fetch shape: every [`Admission`] returned from this module is fully
//! loaded, i.e. its patient (`medical_journal`) and its doctors in
//! assignment order. Doctors and patients are plain rows.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{Admission, Doctor, NewDoctor, NewPatient, Patient};

/// Predicate used by [`JournalRepository::find_admissions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionFilter {
    All,
    /// Admission with this id.
    Id(i64),
    /// Admissions of this patient.
    Patient(i64),
    /// Admissions this doctor is assigned to.
    Doctor(i64),
}

impl AdmissionFilter {
    fn condition(&self) -> (&'static str, Option<i64>) {
        match *self {
            AdmissionFilter::All => ("1=1", None),
            AdmissionFilter::Id(id) => ("a.id = ?", Some(id)),
            AdmissionFilter::Patient(id) => ("a.patient_id = ?", Some(id)),
            AdmissionFilter::Doctor(id) => (
                "a.id IN (SELECT admission_id FROM admission_doctors WHERE doctor_id = ?)",
                Some(id),
            ),
        }
    }
}

/// Repository for reading and writing doctors, patients and admissions.
pub struct JournalRepository {
    pool: SqlitePool,
}

fn doctor_from_row(row: &SqliteRow) -> Result<Doctor, sqlx::Error> {
    Ok(Doctor {
        doctor_id: row.try_get("id")?,
        name: row.try_get("name")?,
        department: row.try_get("department")?,
    })
}

fn patient_from_row(row: &SqliteRow) -> Result<Patient, sqlx::Error> {
    Ok(Patient {
        patient_id: row.try_get("id")?,
        name: row.try_get("name")?,
        social_security_number: row.try_get("social_security_number")?,
    })
}

impl JournalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Round-trip to the database, used by the health endpoint.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ---- Doctors ----

    /// Insert a doctor. Returns the new row id.
    pub async fn insert_doctor(&self, doctor: &NewDoctor) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO doctors (name, department) VALUES (?, ?)")
            .bind(&doctor.name)
            .bind(&doctor.department)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_doctor(&self, id: i64) -> Result<Option<Doctor>, sqlx::Error> {
        let row = sqlx::query("SELECT id, name, department FROM doctors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(doctor_from_row).transpose()
    }

    pub async fn find_doctors_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<Doctor>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, department FROM doctors WHERE department = ? ORDER BY id ASC",
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(doctor_from_row).collect()
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, name, department FROM doctors ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(doctor_from_row).collect()
    }

    pub async fn count_doctors(&self) -> Result<i64, sqlx::Error> {
        self.count("SELECT COUNT(*) AS cnt FROM doctors").await
    }

    // ---- Patients ----

    /// Insert a patient. Returns the new row id.
    pub async fn insert_patient(&self, patient: &NewPatient) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO patients (name, social_security_number) VALUES (?, ?)")
                .bind(&patient.name)
                .bind(&patient.social_security_number)
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_patient(&self, id: i64) -> Result<Option<Patient>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, name, social_security_number FROM patients WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(patient_from_row).transpose()
    }

    /// First patient (lowest id) with the given social security number.
    pub async fn find_patient_by_ssn(&self, ssn: &str) -> Result<Option<Patient>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, name, social_security_number FROM patients
             WHERE social_security_number = ?
             ORDER BY id ASC
             LIMIT 1",
        )
        .bind(ssn)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(patient_from_row).transpose()
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, name, social_security_number FROM patients ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(patient_from_row).collect()
    }

    pub async fn count_patients(&self) -> Result<i64, sqlx::Error> {
        self.count("SELECT COUNT(*) AS cnt FROM patients").await
    }

    // ---- Admissions ----

    /// Insert an admission together with its initial doctor links in a single
    /// transaction. Returns the new admission id.
    pub async fn insert_admission(
        &self,
        department: &str,
        patient_id: i64,
        doctor_ids: &[i64],
    ) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let admission_id =
            sqlx::query("INSERT INTO admissions (department, patient_id) VALUES (?, ?)")
                .bind(department)
                .bind(patient_id)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();

        for &doctor_id in doctor_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO admission_doctors (admission_id, doctor_id) VALUES (?, ?)",
            )
            .bind(admission_id)
            .bind(doctor_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(admission_id)
    }

    /// Fully loaded admissions matching `filter`, ordered by admission id.
    pub async fn find_admissions(
        &self,
        filter: AdmissionFilter,
    ) -> Result<Vec<Admission>, sqlx::Error> {
        let (condition, param) = filter.condition();
        let sql = format!(
            "SELECT a.id AS admission_id, a.department AS admission_department,
                    p.id, p.name, p.social_security_number
             FROM admissions a
             JOIN patients p ON p.id = a.patient_id
             WHERE {}
             ORDER BY a.id ASC",
            condition
        );

        let rows = {
            let mut q = sqlx::query(&sql);
            if let Some(id) = param {
                q = q.bind(id);
            }
            q.fetch_all(&self.pool).await?
        };

        let mut admissions = Vec::with_capacity(rows.len());
        for row in &rows {
            let admission_id: i64 = row.try_get("admission_id")?;
            admissions.push(Admission {
                admission_id,
                department: row.try_get("admission_department")?,
                doctors: self.admission_doctors(admission_id).await?,
                medical_journal: patient_from_row(row)?,
            });
        }

        Ok(admissions)
    }

    pub async fn find_admission(&self, id: i64) -> Result<Option<Admission>, sqlx::Error> {
        Ok(self
            .find_admissions(AdmissionFilter::Id(id))
            .await?
            .into_iter()
            .next())
    }

    /// The admission holding the patient's journal. When a patient has
    /// several admissions the oldest one (lowest id) is returned.
    pub async fn find_admission_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Option<Admission>, sqlx::Error> {
        Ok(self
            .find_admissions(AdmissionFilter::Patient(patient_id))
            .await?
            .into_iter()
            .next())
    }

    pub async fn list_admissions(&self) -> Result<Vec<Admission>, sqlx::Error> {
        self.find_admissions(AdmissionFilter::All).await
    }

    /// Append a doctor to an admission.
    /// Returns `false` if the doctor was already assigned.
    pub async fn add_doctor_to_admission(
        &self,
        admission_id: i64,
        doctor_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO admission_doctors (admission_id, doctor_id) VALUES (?, ?)",
        )
        .bind(admission_id)
        .bind(doctor_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_admissions(&self) -> Result<i64, sqlx::Error> {
        self.count("SELECT COUNT(*) AS cnt FROM admissions").await
    }

    async fn admission_doctors(&self, admission_id: i64) -> Result<Vec<Doctor>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT d.id, d.name, d.department
             FROM admission_doctors ad
             JOIN doctors d ON d.id = ad.doctor_id
             WHERE ad.admission_id = ?
             ORDER BY ad.rowid ASC",
        )
        .bind(admission_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(doctor_from_row).collect()
    }

    async fn count(&self, sql: &str) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(sql).fetch_one(&self.pool).await?;
        row.try_get("cnt")
    }
}
