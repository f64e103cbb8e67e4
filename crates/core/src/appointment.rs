//! Appointment status state machine.
//!
//! Status IDs match the `appointment_statuses` seed data (1-based
//! SMALLSERIAL). The serialized form is always the lowercase name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle stage of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(i16)]
pub enum AppointmentStatus {
    Pending = 1,
    Confirmed = 2,
    Cancelled = 3,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
    ];

    /// Return the database status ID.
    pub fn id(self) -> i16 {
        self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(AppointmentStatus::Pending),
            2 => Some(AppointmentStatus::Confirmed),
            3 => Some(AppointmentStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Cancelled is terminal: nothing leaves it.
    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Cancelled)
    }

    /// Statuses reachable from `self` in one step.
    pub fn valid_transitions(self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => &[AppointmentStatus::Cancelled],
            AppointmentStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, to: AppointmentStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Statuses from which `target` may be entered.
    pub fn sources_of(target: AppointmentStatus) -> Vec<AppointmentStatus> {
        Self::ALL
            .into_iter()
            .filter(|s| s.can_transition_to(target))
            .collect()
    }

    /// Validate moving appointment `id` from `self` to `to`.
    ///
    /// Leaving `Cancelled` is reported as [`CoreError::AlreadyCancelled`];
    /// every other illegal move is a [`CoreError::Conflict`].
    pub fn validate_transition(self, id: DbId, to: AppointmentStatus) -> Result<(), CoreError> {
        if self.can_transition_to(to) {
            return Ok(());
        }
        if self == AppointmentStatus::Cancelled {
            return Err(CoreError::AlreadyCancelled { id });
        }
        Err(CoreError::Conflict(format!(
            "Appointment {id} cannot move from {self} to {to}"
        )))
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: pending, confirmed, cancelled"
                ))
            })
    }
}

impl TryFrom<i16> for AppointmentStatus {
    type Error = CoreError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        Self::from_id(id)
            .ok_or_else(|| CoreError::Internal(format!("Unknown appointment status id {id}")))
    }
}

impl From<AppointmentStatus> for i16 {
    fn from(status: AppointmentStatus) -> Self {
        status.id()
    }
}
