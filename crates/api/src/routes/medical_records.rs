//! Route definitions for the `/medical-records` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::medical_records;
use crate::state::AppState;

/// Routes mounted at `/medical-records`.
///
/// ```text
/// POST / -> create
/// ```
///
/// Listing lives under `/pets/{id}/medical-records`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(medical_records::create))
}
