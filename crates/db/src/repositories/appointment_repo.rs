//! Repository for the `appointments` table.
//!
//! Status changes are single conditional `UPDATE`s: the row only changes if
//! its current status is a valid source for the target. PostgreSQL's row
//! lock makes a concurrent second caller re-check the condition after the
//! first commits, so exactly one of two racing cancels succeeds.

use petclinic_core::appointment::AppointmentStatus;
use petclinic_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::appointment::{
    Appointment, AppointmentFilter, AppointmentWithPet, CreateAppointment, TransitionOutcome,
};

/// Column list for `appointments`; `status_id` is aliased to the model field.
const COLUMNS: &str = "id, pet_id, scheduled_at, service, service_id, \
    status_id AS status, notes, created_at, updated_at";

/// Joined column list (appointments `a`, pets `p`).
const JOINED_COLUMNS: &str = "a.id, a.pet_id, a.scheduled_at, a.service, a.service_id, \
    a.status_id AS status, a.notes, a.created_at, a.updated_at, \
    p.name AS pet_name, p.species AS pet_species, p.breed AS pet_breed";

/// Provides persistence and status transitions for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Insert a new pending appointment.
    ///
    /// Returns `None` (and inserts nothing) if `pet_id` does not reference
    /// an existing pet. A pet deleted between the `SELECT` and the foreign
    /// key check surfaces as `fk_appointments_pet` and is reported the same
    /// way.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments (pet_id, scheduled_at, service, service_id, notes) \
             SELECT p.id, $2, $3, $4, $5 FROM pets p WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        let result = sqlx::query_as::<_, Appointment>(&query)
            .bind(input.pet_id)
            .bind(input.scheduled_at)
            .bind(&input.service)
            .bind(input.service_id)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await;

        match result {
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some("23503")
                    && db_err.constraint() == Some("fk_appointments_pet") =>
            {
                tracing::debug!(pet_id = input.pet_id, "Pet deleted while booking");
                Ok(None)
            }
            other => other,
        }
    }

    /// Find an appointment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an appointment by ID, joined with its pet.
    pub async fn find_with_pet(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AppointmentWithPet>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM appointments a \
             JOIN pets p ON p.id = a.pet_id \
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, AppointmentWithPet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List appointments matching `filter`, earliest first.
    ///
    /// Ties on `scheduled_at` are broken by ID so the order is total.
    pub async fn list(
        pool: &PgPool,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentWithPet>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM appointments a \
             JOIN pets p ON p.id = a.pet_id \
             WHERE ($1::SMALLINT IS NULL OR a.status_id = $1) \
               AND ($2::BIGINT IS NULL OR a.pet_id = $2) \
               AND ($3::BIGINT IS NULL OR p.owner_id = $3) \
               AND ($4::TIMESTAMPTZ IS NULL OR a.scheduled_at >= $4) \
               AND ($5::TIMESTAMPTZ IS NULL OR a.scheduled_at < $5) \
             ORDER BY a.scheduled_at ASC, a.id ASC"
        );
        sqlx::query_as::<_, AppointmentWithPet>(&query)
            .bind(filter.status.map(AppointmentStatus::id))
            .bind(filter.pet_id)
            .bind(filter.owner_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    /// Move an appointment to `target` if its current status allows it.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        target: AppointmentStatus,
    ) -> Result<TransitionOutcome, sqlx::Error> {
        let sources: Vec<i16> = AppointmentStatus::sources_of(target)
            .into_iter()
            .map(AppointmentStatus::id)
            .collect();

        let query = format!(
            "UPDATE appointments SET status_id = $2 \
             WHERE id = $1 AND status_id = ANY($3) \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(target.id())
            .bind(&sources)
            .fetch_optional(pool)
            .await?;

        if let Some(appointment) = updated {
            tracing::debug!(appointment_id = id, status = %target, "Appointment status changed");
            return Ok(TransitionOutcome::Applied(appointment));
        }

        let current: Option<(i16,)> =
            sqlx::query_as("SELECT status_id FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        match current {
            None => Ok(TransitionOutcome::NotFound),
            Some((status_id,)) => {
                let current = AppointmentStatus::try_from(status_id)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok(TransitionOutcome::Rejected { current })
            }
        }
    }

    /// Cancel a pending or confirmed appointment.
    pub async fn cancel(pool: &PgPool, id: DbId) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, id, AppointmentStatus::Cancelled).await
    }

    /// Confirm a pending appointment.
    pub async fn confirm(pool: &PgPool, id: DbId) -> Result<TransitionOutcome, sqlx::Error> {
        Self::transition(pool, id, AppointmentStatus::Confirmed).await
    }

    /// Count appointments for a pet that are not cancelled.
    ///
    /// Takes any executor so [`PetRepo::delete`](crate::repositories::PetRepo::delete)
    /// can count inside its transaction.
    pub async fn count_active_for_pet<'e>(
        executor: impl PgExecutor<'e>,
        pet_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM appointments WHERE pet_id = $1 AND status_id <> $2",
        )
        .bind(pet_id)
        .bind(AppointmentStatus::Cancelled.id())
        .fetch_one(executor)
        .await?;
        Ok(row.0)
    }
}
