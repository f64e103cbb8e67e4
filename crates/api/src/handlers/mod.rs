pub mod appointments;
pub mod auth;
pub mod medical_records;
pub mod pets;
pub mod services;
