//! Medical record entity model and DTOs.

use chrono::NaiveDate;
use petclinic_core::medical_record::RecordType;
use petclinic_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `medical_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalRecord {
    pub id: DbId,
    pub pet_id: DbId,
    #[sqlx(try_from = "String")]
    pub record_type: RecordType,
    pub title: String,
    pub description: String,
    pub recorded_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a validated medical record.
#[derive(Debug, Clone)]
pub struct CreateMedicalRecord {
    pub pet_id: DbId,
    pub record_type: RecordType,
    pub title: String,
    pub description: String,
    pub recorded_on: NaiveDate,
    pub next_due_on: Option<NaiveDate>,
    pub notes: Option<String>,
}
