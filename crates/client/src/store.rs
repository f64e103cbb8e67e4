//! The appointment store as seen from a client.

use async_trait::async_trait;
use petclinic_core::booking::ValidBooking;
use petclinic_core::types::DbId;

use crate::error::StoreError;
use crate::model::{Appointment, AppointmentQuery};

/// Durable record of appointments.
///
/// Every call is a round trip and must be awaited. `create` assigns a new
/// id and `pending` status. `list` is ordered by date-time ascending and is
/// recomputed on every call. A second `cancel` of the same id fails with
/// [`StoreError::AlreadyCancelled`].
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(&self, booking: &ValidBooking) -> Result<Appointment, StoreError>;

    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, StoreError>;

    async fn get_by_id(&self, id: DbId) -> Result<Appointment, StoreError>;

    async fn cancel(&self, id: DbId) -> Result<Appointment, StoreError>;
}
