//! Service catalog entity model.
//!
//! The catalog is seeded by migrations; there is no write API.

use petclinic_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price_cents: i32,
    pub duration_label: String,
    pub includes: Vec<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
