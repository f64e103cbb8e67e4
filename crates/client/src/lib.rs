//! Client side of the appointment workflow.
//!
//! - [`store::AppointmentStore`] -- the persistence boundary as seen from a client.
//! - [`http::HttpAppointmentStore`] -- the store over the clinic's HTTP API.
//! - [`form::AppointmentForm`] -- the booking form controller.

pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod model;
pub mod store;

pub use config::ClientConfig;
pub use error::StoreError;
pub use form::{AppointmentForm, FormError, FormState};
pub use http::HttpAppointmentStore;
pub use model::{Appointment, AppointmentQuery};
pub use store::AppointmentStore;
