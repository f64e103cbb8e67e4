//! Repository for the `pets` table.

use petclinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::pet::{CreatePet, Pet, PetDeletion, UpdatePet};
use crate::repositories::AppointmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, name, species, breed, age_years, weight_kg, created_at, updated_at";

/// Provides CRUD operations for pets.
pub struct PetRepo;

impl PetRepo {
    /// Insert a new pet owned by `owner_id` (if any).
    pub async fn create(
        pool: &PgPool,
        owner_id: Option<DbId>,
        input: &CreatePet,
    ) -> Result<Pet, sqlx::Error> {
        let query = format!(
            "INSERT INTO pets (owner_id, name, species, breed, age_years, weight_kg) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(owner_id)
            .bind(input.name.trim())
            .bind(input.species.trim())
            .bind(input.breed.as_deref().map(str::trim))
            .bind(input.age_years)
            .bind(input.weight_kg)
            .fetch_one(pool)
            .await
    }

    /// Find a pet by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pets WHERE id = $1");
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List pets, optionally restricted to one owner, ordered by name.
    pub async fn list(pool: &PgPool, owner_id: Option<DbId>) -> Result<Vec<Pet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pets \
             WHERE ($1::BIGINT IS NULL OR owner_id = $1) \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a pet. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePet,
    ) -> Result<Option<Pet>, sqlx::Error> {
        let query = format!(
            "UPDATE pets SET \
                name = COALESCE($2, name), \
                species = COALESCE($3, species), \
                breed = COALESCE($4, breed), \
                age_years = COALESCE($5, age_years), \
                weight_kg = COALESCE($6, weight_kg) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Pet>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.species.as_deref().map(str::trim))
            .bind(input.breed.as_deref().map(str::trim))
            .bind(input.age_years)
            .bind(input.weight_kg)
            .fetch_optional(pool)
            .await
    }

    /// Delete a pet unless it still has active appointments.
    ///
    /// The pet row is locked for the duration of the check, so an
    /// appointment cannot be booked for it between the count and the
    /// delete. Cancelled appointments are removed with the pet.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<PetDeletion, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<(DbId,)> = sqlx::query_as("SELECT id FROM pets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(PetDeletion::NotFound);
        }

        let active = AppointmentRepo::count_active_for_pet(&mut *tx, id).await?;

        if active > 0 {
            tracing::debug!(pet_id = id, active, "Pet deletion blocked by active appointments");
            return Ok(PetDeletion::Blocked {
                active_appointments: active,
            });
        }

        sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(PetDeletion::Deleted)
    }
}
