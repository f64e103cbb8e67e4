//! Handlers for pet medical records.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use petclinic_core::booking::DATE_FORMAT;
use petclinic_core::error::CoreError;
use petclinic_core::medical_record::{validate_record, RecordType};
use petclinic_core::types::DbId;
use petclinic_core::validation::FieldErrors;
use petclinic_db::models::medical_record::{CreateMedicalRecord, MedicalRecord};
use petclinic_db::repositories::{MedicalRecordRepo, PetRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::response::{CreatedResponse, DataResponse};
use crate::state::AppState;

/// Request body for `POST /medical-records`.
#[derive(Debug, Deserialize)]
pub struct CreateMedicalRecordRequest {
    pub pet_id: DbId,
    pub record_type: String,
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Next vaccine due date, `YYYY-MM-DD`.
    pub next_date: Option<String>,
    pub notes: Option<String>,
}

/// POST /api/v1/medical-records
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMedicalRecordRequest>,
) -> AppResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();

    let record_type = match input.record_type.parse::<RecordType>() {
        Ok(record_type) => Some(record_type),
        Err(_) => {
            errors.push(
                "record_type",
                "must be one of: checkup, vaccine, surgery, other",
            );
            None
        }
    };
    let recorded_on = parse_record_date(&mut errors, "date", Some(&input.date));
    if input.date.trim().is_empty() {
        errors.push("date", "is required");
    }
    let next_due_on = parse_record_date(&mut errors, "next_date", input.next_date.as_deref());

    let (Some(record_type), Some(recorded_on)) = (record_type, recorded_on) else {
        return Err(errors.into());
    };
    if !errors.is_empty() {
        return Err(errors.into());
    }

    validate_record(
        record_type,
        &input.title,
        &input.description,
        recorded_on,
        next_due_on,
    )?;

    let create = CreateMedicalRecord {
        pet_id: input.pet_id,
        record_type,
        title: input.title.trim().to_string(),
        description: input.description.trim().to_string(),
        recorded_on,
        next_due_on,
        notes: input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    let record = MedicalRecordRepo::create(&state.pool, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pet",
            id: input.pet_id,
        }))?;

    tracing::info!(
        record_id = record.id,
        pet_id = record.pet_id,
        record_type = %record.record_type,
        "Medical record created"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(record.id, record))))
}

/// GET /api/v1/pets/{id}/medical-records
///
/// Newest first.
pub async fn list_for_pet(
    State(state): State<AppState>,
    AppPath(pet_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<MedicalRecord>>>> {
    PetRepo::find_by_id(&state.pool, pet_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pet",
            id: pet_id,
        }))?;

    let records = MedicalRecordRepo::list_for_pet(&state.pool, pet_id).await?;
    Ok(Json(DataResponse { data: records }))
}

/// Absent or blank input yields `None` without an error.
fn parse_record_date(
    errors: &mut FieldErrors,
    field: &str,
    raw: Option<&str>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, "must be formatted as YYYY-MM-DD");
            None
        }
    }
}
