//! Handlers for the `/pets` resource.
//!
//! Pets created with a bearer token belong to that user; listings are
//! narrowed to the caller's pets when a token is present.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petclinic_core::error::CoreError;
use petclinic_core::pet::validate_profile;
use petclinic_core::types::DbId;
use petclinic_db::models::pet::{CreatePet, Pet, PetDeletion, UpdatePet};
use petclinic_db::repositories::PetRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::MaybeAuthUser;
use crate::response::{CreatedResponse, DataResponse};
use crate::state::AppState;

/// POST /api/v1/pets
pub async fn create(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppJson(input): AppJson<CreatePet>,
) -> AppResult<impl IntoResponse> {
    validate_profile(
        &input.name,
        &input.species,
        input.breed.as_deref(),
        input.age_years,
        input.weight_kg,
    )?;

    let pet = PetRepo::create(&state.pool, caller.user_id(), &input).await?;
    tracing::info!(pet_id = pet.id, owner_id = ?pet.owner_id, "Pet created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(pet.id, pet))))
}

/// GET /api/v1/pets
pub async fn list(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
) -> AppResult<Json<DataResponse<Vec<Pet>>>> {
    let pets = PetRepo::list(&state.pool, caller.user_id()).await?;
    Ok(Json(DataResponse { data: pets }))
}

/// GET /api/v1/pets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let pet = find_pet(&state, id).await?;
    Ok(Json(DataResponse { data: pet }))
}

/// PUT /api/v1/pets/{id}
///
/// The merged profile (stored values overlaid with the update) must pass
/// the same validation as a new pet.
pub async fn update(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePet>,
) -> AppResult<Json<DataResponse<Pet>>> {
    let existing = find_pet(&state, id).await?;
    ensure_owner(&caller, &existing)?;

    validate_profile(
        input.name.as_deref().unwrap_or(&existing.name),
        input.species.as_deref().unwrap_or(&existing.species),
        input.breed.as_deref().or(existing.breed.as_deref()),
        input.age_years.unwrap_or(existing.age_years),
        input.weight_kg.or(existing.weight_kg),
    )?;

    let pet = PetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))?;
    Ok(Json(DataResponse { data: pet }))
}

/// DELETE /api/v1/pets/{id}
///
/// Refused with 409 while the pet has pending or confirmed appointments.
/// Cancelled appointments are removed together with the pet.
pub async fn delete(
    State(state): State<AppState>,
    caller: MaybeAuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    let existing = find_pet(&state, id).await?;
    ensure_owner(&caller, &existing)?;

    match PetRepo::delete(&state.pool, id).await? {
        PetDeletion::Deleted => {
            tracing::info!(pet_id = id, "Pet deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        PetDeletion::Blocked {
            active_appointments,
        } => Err(AppError::Core(CoreError::Conflict(format!(
            "Pet {id} has {active_appointments} active appointment(s); cancel them first"
        )))),
        PetDeletion::NotFound => Err(AppError::Core(CoreError::NotFound { entity: "Pet", id })),
    }
}

async fn find_pet(state: &AppState, id: DbId) -> AppResult<Pet> {
    PetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Pet", id }))
}

/// An authenticated caller may only modify their own pets. Anonymous
/// callers and unowned pets are not restricted.
fn ensure_owner(caller: &MaybeAuthUser, pet: &Pet) -> AppResult<()> {
    match (caller.user_id(), pet.owner_id) {
        (Some(user_id), Some(owner_id)) if user_id != owner_id => Err(AppError::Core(
            CoreError::Forbidden(format!("Pet {} belongs to another owner", pet.id)),
        )),
        _ => Ok(()),
    }
}
