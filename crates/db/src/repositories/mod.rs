//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod appointment_repo;
pub mod medical_record_repo;
pub mod pet_repo;
pub mod service_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepo;
pub use medical_record_repo::MedicalRecordRepo;
pub use pet_repo::PetRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
