//! Pet clinic domain logic.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! persistence layer, the HTTP server and the client-side form controller.

pub mod appointment;
pub mod booking;
pub mod error;
pub mod medical_record;
pub mod pet;
pub mod types;
pub mod user;
pub mod validation;
