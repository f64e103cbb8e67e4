//! Repository for the `medical_records` table.

use petclinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::medical_record::{CreateMedicalRecord, MedicalRecord};

const COLUMNS: &str = "id, pet_id, record_type, title, description, recorded_on, \
    next_due_on, notes, created_at, updated_at";

/// Provides create and list operations for medical records.
pub struct MedicalRecordRepo;

impl MedicalRecordRepo {
    /// Insert a record. Returns `None` if the pet does not exist.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMedicalRecord,
    ) -> Result<Option<MedicalRecord>, sqlx::Error> {
        let query = format!(
            "INSERT INTO medical_records \
                (pet_id, record_type, title, description, recorded_on, next_due_on, notes) \
             SELECT p.id, $2, $3, $4, $5, $6, $7 FROM pets p WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MedicalRecord>(&query)
            .bind(input.pet_id)
            .bind(input.record_type.as_str())
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.recorded_on)
            .bind(input.next_due_on)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// List a pet's records, newest first.
    pub async fn list_for_pet(
        pool: &PgPool,
        pet_id: DbId,
    ) -> Result<Vec<MedicalRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM medical_records \
             WHERE pet_id = $1 \
             ORDER BY recorded_on DESC, id DESC"
        );
        sqlx::query_as::<_, MedicalRecord>(&query)
            .bind(pet_id)
            .fetch_all(pool)
            .await
    }
}
