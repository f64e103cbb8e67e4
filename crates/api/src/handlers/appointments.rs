//! Handlers for the `/appointments` resource.
//!
//! Creation runs the same draft validation the client form runs, then
//! inserts in a single statement that only succeeds if the pet exists.
//! Status changes go through [`AppointmentRepo::transition`], which is a
//! single conditional update.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use petclinic_core::appointment::AppointmentStatus;
use petclinic_core::booking::{parse_date, parse_time, validate_draft, AppointmentDraft};
use petclinic_core::error::CoreError;
use petclinic_core::types::DbId;
use petclinic_core::validation::FieldErrors;
use petclinic_db::models::appointment::{
    Appointment, AppointmentFilter, AppointmentWithPet, CreateAppointment, TransitionOutcome,
};
use petclinic_db::repositories::{AppointmentRepo, PetRepo, ServiceRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::MaybeAuthUser;
use crate::query::AppointmentListParams;
use crate::response::{CreatedResponse, DataResponse};
use crate::state::AppState;

/// Request body for `POST /appointments`.
///
/// Every field is optional at the wire level so missing fields are
/// reported as field errors instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAppointmentRequest {
    pub pet_id: Option<IdInput>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `HH:MM`
    pub time: Option<String>,
    pub service: Option<String>,
    /// Catalog reference; supplies `service` when that is blank.
    pub service_id: Option<IdInput>,
    pub notes: Option<String>,
}

/// An id sent either as a JSON number or as a numeric string (picker
/// widgets submit their selected value as text).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(DbId),
    Text(String),
}

impl IdInput {
    /// Resolve to an id, recording a field error for non-numeric text.
    /// Blank text counts as absent.
    fn resolve(self, errors: &mut FieldErrors, field: &str) -> Option<DbId> {
        match self {
            IdInput::Number(id) => Some(id),
            IdInput::Text(raw) => {
                let raw = raw.trim();
                if raw.is_empty() {
                    return None;
                }
                match raw.parse::<DbId>() {
                    Ok(id) => Some(id),
                    Err(_) => {
                        errors.push(field, "must be a number");
                        None
                    }
                }
            }
        }
    }
}

/// POST /api/v1/appointments
///
/// Responds `201 { success, id, data }` with the stored pending appointment.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAppointmentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut errors = FieldErrors::new();
    let pet_id = input
        .pet_id
        .and_then(|id| id.resolve(&mut errors, "pet_id"));
    let date = parse_date(&mut errors, input.date.as_deref());
    let time = parse_time(&mut errors, input.time.as_deref());
    let service_id = input
        .service_id
        .and_then(|id| id.resolve(&mut errors, "service_id"));

    let mut service = input.service.unwrap_or_default();
    if let Some(service_id) = service_id {
        match ServiceRepo::find_active_by_id(&state.pool, service_id).await? {
            Some(catalog) if service.trim().is_empty() => service = catalog.name,
            Some(_) => {}
            None => errors.push("service_id", "must reference an active service"),
        }
    }

    let draft = AppointmentDraft {
        pet_id,
        date,
        time,
        service,
        notes: input.notes,
    };

    let booking = match validate_draft(&draft, Utc::now()) {
        Ok(booking) if errors.is_empty() => booking,
        Ok(_) => return Err(errors.into()),
        Err(draft_errors) => {
            // Format errors take precedence over "is required" for the same field.
            for err in draft_errors.iter() {
                if errors.get(&err.field).is_none() {
                    errors.push(err.field.clone(), err.message.clone());
                }
            }
            return Err(errors.into());
        }
    };

    let pet_id = booking.pet_id;
    let mut create = CreateAppointment::from(booking);
    create.service_id = service_id;

    let appointment = AppointmentRepo::create(&state.pool, &create)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Pet",
            id: pet_id,
        }))?;

    tracing::info!(
        appointment_id = appointment.id,
        pet_id,
        scheduled_at = %appointment.scheduled_at,
        "Appointment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new(appointment.id, appointment)),
    ))
}

/// GET /api/v1/appointments
///
/// Ordered by `scheduled_at` ascending, ties broken by id. Authenticated
/// callers only see appointments for their own pets.
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppQuery(params): AppQuery<AppointmentListParams>,
) -> AppResult<Json<DataResponse<Vec<AppointmentWithPet>>>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<AppointmentStatus>)
        .transpose()?;

    let filter = AppointmentFilter {
        status,
        pet_id: params.pet_id,
        owner_id: caller.user_id(),
        from: params.from,
        to: params.to,
    };

    let appointments = AppointmentRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: appointments }))
}

/// GET /api/v1/appointments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<AppointmentWithPet>>> {
    ensure_owner(&state, &caller, id).await?;
    let appointment = AppointmentRepo::find_with_pet(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        }))?;
    Ok(Json(DataResponse { data: appointment }))
}

/// PUT /api/v1/appointments/{id}/confirm
pub async fn confirm(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Appointment>>> {
    ensure_owner(&state, &caller, id).await?;
    let outcome = AppointmentRepo::confirm(&state.pool, id).await?;
    transition_response(id, AppointmentStatus::Confirmed, outcome)
}

/// PUT /api/v1/appointments/{id}/cancel
///
/// A second cancel of the same appointment is `409 ALREADY_CANCELLED`.
pub async fn cancel(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Appointment>>> {
    ensure_owner(&state, &caller, id).await?;
    let outcome = AppointmentRepo::cancel(&state.pool, id).await?;
    transition_response(id, AppointmentStatus::Cancelled, outcome)
}

/// An authenticated caller may only read or change appointments for their
/// own pets, matching the rule for pet updates. Anonymous callers and
/// unowned pets are not restricted; a missing appointment is left for the
/// caller to report.
async fn ensure_owner(state: &AppState, caller: &MaybeAuthUser, id: DbId) -> AppResult<()> {
    let Some(user_id) = caller.user_id() else {
        return Ok(());
    };
    let Some(appointment) = AppointmentRepo::find_by_id(&state.pool, id).await? else {
        return Ok(());
    };
    let owner_id = PetRepo::find_by_id(&state.pool, appointment.pet_id)
        .await?
        .and_then(|pet| pet.owner_id);

    match owner_id {
        Some(owner_id) if owner_id != user_id => Err(AppError::Core(CoreError::Forbidden(
            format!("Appointment {id} belongs to another owner"),
        ))),
        _ => Ok(()),
    }
}

fn transition_response(
    id: DbId,
    target: AppointmentStatus,
    outcome: TransitionOutcome,
) -> AppResult<Json<DataResponse<Appointment>>> {
    match outcome {
        TransitionOutcome::Applied(appointment) => {
            tracing::info!(appointment_id = id, status = %target, "Appointment status changed");
            Ok(Json(DataResponse { data: appointment }))
        }
        TransitionOutcome::Rejected { current } => {
            tracing::debug!(appointment_id = id, %current, to = %target, "Transition rejected");
            current.validate_transition(id, target)?;
            // A status that permits the move cannot be rejected by the update.
            Err(AppError::InternalError(format!(
                "Appointment {id} transition to {target} rejected from {current}"
            )))
        }
        TransitionOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Appointment",
            id,
        })),
    }
}
