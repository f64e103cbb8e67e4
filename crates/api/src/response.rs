//! Shared response envelope types for API handlers.
//!
//! Reads use a `{ "data": ... }` envelope. Creations answer with
//! `{ "success": true, "id": ..., "data": ... }` so clients that only look
//! at `success`/`id` keep working.

use petclinic_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope returned with `201 Created`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T: Serialize> {
    pub success: bool,
    pub id: DbId,
    pub data: T,
}

impl<T: Serialize> CreatedResponse<T> {
    pub fn new(id: DbId, data: T) -> Self {
        Self {
            success: true,
            id,
            data,
        }
    }
}
