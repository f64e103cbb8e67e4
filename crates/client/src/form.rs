//! Appointment booking form controller.
//!
//! The form owns an [`AppointmentDraft`], the field errors from the last
//! validation, the last user-facing failure message, and the list of
//! appointments shown next to it. Submission goes through
//! `Editing -> Submitting -> Editing`:
//!
//! - invalid draft: field errors are recorded and the store is not called;
//! - store failure: the message is recorded and the list is left alone;
//! - store success: the appointment joins the list and the draft is reset.
//!
//! [`AppointmentForm::submit`] drives the whole cycle. UIs that run the
//! network call outside the form (for example on a spawned task) use
//! [`AppointmentForm::begin_submit`] and [`AppointmentForm::finish_submit`];
//! while a submission is outstanding, another `begin_submit` is refused.

use petclinic_core::appointment::AppointmentStatus;
use petclinic_core::booking::{validate_draft, AppointmentDraft, ValidBooking};
use petclinic_core::types::{DbId, Timestamp};
use petclinic_core::validation::FieldErrors;

use crate::error::StoreError;
use crate::model::{Appointment, AppointmentQuery};
use crate::store::AppointmentStore;

/// Form-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
}

/// Why a form action did not complete.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    /// The draft failed local validation; nothing was sent.
    #[error("Invalid appointment: {0}")]
    Invalid(FieldErrors),

    /// A submission is already outstanding.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// A result arrived while no submission was outstanding.
    #[error("No submission is in progress")]
    NotSubmitting,

    /// The store rejected the request or could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Booking form bound to an [`AppointmentStore`].
pub struct AppointmentForm<S: AppointmentStore> {
    store: S,
    draft: AppointmentDraft,
    field_errors: FieldErrors,
    error: Option<String>,
    appointments: Vec<Appointment>,
    state: FormState,
}

impl<S: AppointmentStore> AppointmentForm<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            draft: AppointmentDraft::default(),
            field_errors: FieldErrors::new(),
            error: None,
            appointments: Vec::new(),
            state: FormState::Editing,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    /// Mutable access for field edits.
    pub fn draft_mut(&mut self) -> &mut AppointmentDraft {
        &mut self.draft
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// User-facing message from the last failed store call, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Appointments in display order (date-time ascending, then id).
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Validate the draft at instant `now` and enter `Submitting`.
    ///
    /// On success the caller must hand the store's result to
    /// [`Self::finish_submit`].
    pub fn begin_submit(&mut self, now: Timestamp) -> Result<ValidBooking, FormError> {
        if self.state == FormState::Submitting {
            return Err(FormError::SubmissionInFlight);
        }

        match validate_draft(&self.draft, now) {
            Ok(booking) => {
                self.field_errors = FieldErrors::new();
                self.error = None;
                self.state = FormState::Submitting;
                Ok(booking)
            }
            Err(errors) => {
                tracing::debug!(errors = %errors, "Appointment draft failed validation");
                self.field_errors = errors.clone();
                self.error = None;
                Err(FormError::Invalid(errors))
            }
        }
    }

    /// Apply the store's answer to an outstanding submission and return to
    /// `Editing`. Refused with [`FormError::NotSubmitting`] outside
    /// `Submitting`; the list and draft are left untouched.
    pub fn finish_submit(
        &mut self,
        result: Result<Appointment, StoreError>,
    ) -> Result<Appointment, FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::NotSubmitting);
        }
        self.state = FormState::Editing;
        match result {
            Ok(appointment) => {
                tracing::info!(appointment_id = appointment.id, "Appointment booked");
                self.upsert(appointment.clone());
                self.draft = AppointmentDraft::default();
                Ok(appointment)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Appointment submission failed");
                if let StoreError::ValidationFailed(fields) = &err {
                    self.field_errors = fields.clone();
                }
                Err(self.fail(err))
            }
        }
    }

    /// Validate, create through the store, and reflect the result.
    pub async fn submit(&mut self, now: Timestamp) -> Result<Appointment, FormError> {
        let booking = self.begin_submit(now)?;
        let result = self.store.create(&booking).await;
        self.finish_submit(result)
    }

    /// Replace the local list with the store's current listing.
    pub async fn refresh(&mut self) -> Result<(), FormError> {
        match self.store.list(&AppointmentQuery::default()).await {
            Ok(mut appointments) => {
                appointments.sort_by_key(Appointment::sort_key);
                self.appointments = appointments;
                self.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Cancel an appointment and reflect the server-confirmed record.
    ///
    /// `AlreadyCancelled` still marks the local copy as cancelled, since the
    /// server has confirmed that status.
    pub async fn cancel(&mut self, id: DbId) -> Result<Appointment, FormError> {
        match self.store.cancel(id).await {
            Ok(appointment) => {
                self.upsert(appointment.clone());
                self.error = None;
                Ok(appointment)
            }
            Err(err) => {
                if err == StoreError::AlreadyCancelled {
                    if let Some(local) = self.appointments.iter_mut().find(|a| a.id == id) {
                        local.status = AppointmentStatus::Cancelled;
                    }
                }
                Err(self.fail(err))
            }
        }
    }

    fn fail(&mut self, err: StoreError) -> FormError {
        self.error = Some(err.user_message());
        FormError::Store(err)
    }

    /// Insert or replace by id, keeping the list sorted.
    fn upsert(&mut self, appointment: Appointment) {
        if let Some(pos) = self.appointments.iter().position(|a| a.id == appointment.id) {
            let mut existing = self.appointments.remove(pos);
            existing.merge_from(appointment);
            self.insert_sorted(existing);
        } else {
            self.insert_sorted(appointment);
        }
    }

    fn insert_sorted(&mut self, appointment: Appointment) {
        let key = appointment.sort_key();
        let pos = self.appointments.partition_point(|a| a.sort_key() < key);
        self.appointments.insert(pos, appointment);
    }
}
