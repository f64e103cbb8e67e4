//! Handlers for the read-only `/services` catalog.

use axum::extract::State;
use axum::Json;
use petclinic_core::error::CoreError;
use petclinic_core::types::DbId;
use petclinic_db::models::service::Service;
use petclinic_db::repositories::ServiceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Service",
            id,
        }))?;
    Ok(Json(DataResponse { data: service }))
}
