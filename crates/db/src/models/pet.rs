//! Pet entity model and DTOs.

use petclinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub owner_id: Option<DbId>,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age_years: i32,
    pub weight_kg: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a pet. The owner comes from the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePet {
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age_years: i32,
    pub weight_kg: Option<f64>,
}

/// DTO for updating a pet. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePet {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age_years: Option<i32>,
    pub weight_kg: Option<f64>,
}

/// Result of a delete request against a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetDeletion {
    Deleted,
    /// The pet still has pending or confirmed appointments.
    Blocked { active_appointments: i64 },
    NotFound,
}
