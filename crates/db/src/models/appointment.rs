//! Appointment entity model and DTOs.
//!
//! Status is stored as a SMALLINT foreign key into `appointment_statuses`
//! and surfaced as [`AppointmentStatus`], which serializes to its
//! lowercase name.

use petclinic_core::appointment::AppointmentStatus;
use petclinic_core::booking::ValidBooking;
use petclinic_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub pet_id: DbId,
    pub scheduled_at: Timestamp,
    pub service: String,
    pub service_id: Option<DbId>,
    #[sqlx(try_from = "i16")]
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An appointment joined with the pet it belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentWithPet {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub appointment: Appointment,
    pub pet_name: String,
    pub pet_species: String,
    pub pet_breed: Option<String>,
}

/// DTO for inserting a validated appointment. Status always starts pending.
#[derive(Debug, Clone)]
pub struct CreateAppointment {
    pub pet_id: DbId,
    pub scheduled_at: Timestamp,
    pub service: String,
    pub service_id: Option<DbId>,
    pub notes: Option<String>,
}

impl From<ValidBooking> for CreateAppointment {
    fn from(booking: ValidBooking) -> Self {
        Self {
            pet_id: booking.pet_id,
            scheduled_at: booking.scheduled_at,
            service: booking.service,
            service_id: None,
            notes: booking.notes,
        }
    }
}

/// Optional narrowing for appointment listings. All conditions are ANDed.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub pet_id: Option<DbId>,
    /// Only appointments for pets owned by this user.
    pub owner_id: Option<DbId>,
    /// Inclusive lower bound on `scheduled_at`.
    pub from: Option<Timestamp>,
    /// Exclusive upper bound on `scheduled_at`.
    pub to: Option<Timestamp>,
}

/// Result of a conditional status change.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    Applied(Appointment),
    /// The row exists but its current status does not allow the change.
    Rejected { current: AppointmentStatus },
    NotFound,
}
