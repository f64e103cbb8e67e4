//! Route definitions for the `/pets` resource.
//!
//! Also nests the per-pet medical record listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::{medical_records, pets};
use crate::state::AppState;

/// Routes mounted at `/pets`.
///
/// ```text
/// GET    /                         -> list
/// POST   /                         -> create
/// GET    /{id}                     -> get_by_id
/// PUT    /{id}                     -> update
/// DELETE /{id}                     -> delete
/// GET    /{id}/medical-records     -> medical_records::list_for_pet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pets::list).post(pets::create))
        .route(
            "/{id}",
            get(pets::get_by_id).put(pets::update).delete(pets::delete),
        )
        .route("/{id}/medical-records", get(medical_records::list_for_pet))
}
