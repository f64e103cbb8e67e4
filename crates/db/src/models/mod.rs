//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is editable

pub mod appointment;
pub mod medical_record;
pub mod pet;
pub mod service;
pub mod user;
