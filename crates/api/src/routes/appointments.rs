//! Route definitions for the `/appointments` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET  /              -> list (?status, ?pet_id, ?from, ?to)
/// POST /              -> create
/// GET  /{id}          -> get_by_id
/// PUT  /{id}/confirm  -> confirm
/// PUT  /{id}/cancel   -> cancel
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list).post(appointments::create))
        .route("/{id}", get(appointments::get_by_id))
        .route("/{id}/confirm", put(appointments::confirm))
        .route("/{id}/cancel", put(appointments::cancel))
}
