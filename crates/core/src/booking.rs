//! Appointment booking drafts and their validation.
//!
//! A draft is what the booking form holds while the user is editing: any
//! field may still be missing. [`validate_draft`] turns a draft into a
//! [`ValidBooking`] or reports every field-level problem. The same function
//! runs in the client form (before any network call) and in the HTTP
//! handler (at the creation boundary), so the two can never disagree.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};
use crate::validation::{limit_length, FieldErrors};

/// Maximum length of the free-text service descriptor.
pub const MAX_SERVICE_LEN: usize = 200;

/// Maximum length of appointment notes.
pub const MAX_NOTES_LEN: usize = 1000;

/// Wire format of the `date` field (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format of the `time` field (`HH:MM`, 24-hour).
pub const TIME_FORMAT: &str = "%H:%M";

/// An appointment being edited. Every field is optional until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub pet_id: Option<DbId>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub service: String,
    pub notes: Option<String>,
}

/// A draft that passed validation. Date and time are combined (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidBooking {
    pub pet_id: DbId,
    pub scheduled_at: Timestamp,
    pub service: String,
    pub notes: Option<String>,
}

impl AppointmentDraft {
    /// Combine `date` and `time` into a UTC instant when both are present.
    pub fn scheduled_at(&self) -> Option<Timestamp> {
        match (self.date, self.time) {
            (Some(date), Some(time)) => Some(date.and_time(time).and_utc()),
            _ => None,
        }
    }
}

/// Validate a draft against the booking policy at instant `now`.
///
/// - `pet_id` is required and must be positive.
/// - `date` and `time` are required; the combined instant must not be
///   earlier than `now`.
/// - `service` is required (non-blank after trimming) and bounded.
/// - `notes` are optional; blank notes are dropped.
pub fn validate_draft(
    draft: &AppointmentDraft,
    now: Timestamp,
) -> Result<ValidBooking, FieldErrors> {
    let mut errors = FieldErrors::new();

    match draft.pet_id {
        None => errors.push("pet_id", "is required"),
        Some(id) if id <= 0 => errors.push("pet_id", "must reference an existing pet"),
        Some(_) => {}
    }

    if draft.date.is_none() {
        errors.push("date", "is required");
    }
    if draft.time.is_none() {
        errors.push("time", "is required");
    }
    let scheduled_at = draft.scheduled_at();
    if let Some(at) = scheduled_at {
        if at < now {
            errors.push("date", "must not be in the past");
        }
    }

    let service = draft.service.trim().to_string();
    if service.is_empty() {
        errors.push("service", "is required");
    }
    limit_length(&mut errors, "service", &service, MAX_SERVICE_LEN);

    let notes = draft
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    if let Some(ref n) = notes {
        limit_length(&mut errors, "notes", n, MAX_NOTES_LEN);
    }

    match (draft.pet_id, scheduled_at) {
        (Some(pet_id), Some(scheduled_at)) if errors.is_empty() => Ok(ValidBooking {
            pet_id,
            scheduled_at,
            service,
            notes,
        }),
        _ => Err(errors),
    }
}

/// Parse the wire `date` field, recording a field error on failure.
pub fn parse_date(errors: &mut FieldErrors, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push("date", "must be formatted as YYYY-MM-DD");
            None
        }
    }
}

/// Parse the wire `time` field, recording a field error on failure.
///
/// Accepts `HH:MM` and, for clients that send seconds, `HH:MM:SS`.
pub fn parse_time(errors: &mut FieldErrors, raw: Option<&str>) -> Option<NaiveTime> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    {
        Ok(time) => Some(time),
        Err(_) => {
            errors.push("time", "must be formatted as HH:MM");
            None
        }
    }
}
