//! Shared query parameter types for API handlers.

use petclinic_core::types::{DbId, Timestamp};
use serde::Deserialize;

/// Query parameters for `GET /appointments`.
///
/// `status` is parsed by the handler so an unknown value produces a
/// validation error rather than a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentListParams {
    pub status: Option<String>,
    pub pet_id: Option<DbId>,
    /// Inclusive lower bound (RFC 3339).
    pub from: Option<Timestamp>,
    /// Exclusive upper bound (RFC 3339).
    pub to: Option<Timestamp>,
}
