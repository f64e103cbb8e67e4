//! Wire types exchanged with the appointments API.

use petclinic_core::appointment::AppointmentStatus;
use petclinic_core::booking::{ValidBooking, DATE_FORMAT, TIME_FORMAT};
use petclinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// An appointment as returned by the server.
///
/// Listing and lookup responses carry the pet's name, species and breed;
/// create and cancel responses do not, so those fields default to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: DbId,
    pub pet_id: DbId,
    pub scheduled_at: Timestamp,
    pub service: String,
    #[serde(default)]
    pub service_id: Option<DbId>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub pet_name: Option<String>,
    #[serde(default)]
    pub pet_species: Option<String>,
    #[serde(default)]
    pub pet_breed: Option<String>,
}

impl Appointment {
    /// Sort key for display lists: date-time, then id.
    pub fn sort_key(&self) -> (Timestamp, DbId) {
        (self.scheduled_at, self.id)
    }

    /// Overlay a server-confirmed record, keeping pet details the server
    /// omitted from that response.
    pub(crate) fn merge_from(&mut self, confirmed: Appointment) {
        let pet_name = confirmed.pet_name.or(self.pet_name.take());
        let pet_species = confirmed.pet_species.or(self.pet_species.take());
        let pet_breed = confirmed.pet_breed.or(self.pet_breed.take());
        *self = Appointment {
            pet_name,
            pet_species,
            pet_breed,
            ..confirmed
        };
    }
}

/// Optional narrowing for [`crate::AppointmentStore::list`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<DbId>,
    /// Inclusive lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Timestamp>,
    /// Exclusive upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Timestamp>,
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAppointment {
    pub pet_id: DbId,
    pub date: String,
    pub time: String,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&ValidBooking> for NewAppointment {
    fn from(booking: &ValidBooking) -> Self {
        Self {
            pet_id: booking.pet_id,
            date: booking.scheduled_at.format(DATE_FORMAT).to_string(),
            time: booking.scheduled_at.format(TIME_FORMAT).to_string(),
            service: booking.service.clone(),
            notes: booking.notes.clone(),
        }
    }
}

/// The `data` member shared by every successful response envelope.
///
/// Creations also carry `success` and `id`, which duplicate `data.id`.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_appointment_uses_wire_formats() {
        let booking = ValidBooking {
            pet_id: 1,
            scheduled_at: chrono::Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
            service: "Consulta General".to_string(),
            notes: None,
        };

        let body = serde_json::to_value(NewAppointment::from(&booking)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "pet_id": 1,
                "date": "2024-06-01",
                "time": "10:00",
                "service": "Consulta General",
            })
        );
    }

    #[test]
    fn decodes_listing_row_with_pet_fields() {
        let row: Appointment = serde_json::from_value(serde_json::json!({
            "id": 5,
            "pet_id": 1,
            "scheduled_at": "2024-06-01T10:00:00Z",
            "service": "Consulta General",
            "service_id": null,
            "status": "pending",
            "notes": null,
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-01T09:00:00Z",
            "pet_name": "Max",
            "pet_species": "Perro",
            "pet_breed": null,
        }))
        .unwrap();

        assert_eq!(row.status, AppointmentStatus::Pending);
        assert_eq!(row.pet_name.as_deref(), Some("Max"));
    }

    #[test]
    fn merge_keeps_pet_details_missing_from_transition_response() {
        let mut listed: Appointment = serde_json::from_value(serde_json::json!({
            "id": 5, "pet_id": 1, "scheduled_at": "2024-06-01T10:00:00Z",
            "service": "Consulta General", "status": "pending", "pet_name": "Max",
        }))
        .unwrap();
        let cancelled = Appointment {
            status: AppointmentStatus::Cancelled,
            pet_name: None,
            ..listed.clone()
        };

        listed.merge_from(cancelled);
        assert_eq!(listed.status, AppointmentStatus::Cancelled);
        assert_eq!(listed.pet_name.as_deref(), Some("Max"));
    }
}
