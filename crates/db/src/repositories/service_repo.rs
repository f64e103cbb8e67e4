//! Repository for the `services` catalog table.

use petclinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::Service;

const COLUMNS: &str = "id, name, description, price_cents, duration_label, includes, \
    sort_order, is_active, created_at, updated_at";

/// Read-only access to the service catalog.
pub struct ServiceRepo;

impl ServiceRepo {
    /// List active services in display order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services WHERE is_active = true ORDER BY sort_order, name"
        );
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    /// Find a service by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a service by ID only if it is bookable.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
