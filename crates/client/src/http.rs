//! [`AppointmentStore`] over the clinic's HTTP API, using [`reqwest`].
//!
//! Reads (`list`, `get_by_id`) are retried on [`StoreError::StoreUnavailable`]
//! with linear backoff. Writes are sent exactly once: a retried create could
//! book the same visit twice, and a retried cancel whose first attempt landed
//! would report `AlreadyCancelled` for its own success.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use petclinic_core::booking::ValidBooking;
use petclinic_core::types::DbId;
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::StoreError;
use crate::model::{Appointment, AppointmentQuery, DataEnvelope, NewAppointment};
use crate::store::AppointmentStore;

/// HTTP client for the `/appointments` resource.
pub struct HttpAppointmentStore {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpAppointmentStore {
    /// Build a store with its own [`reqwest::Client`] using the configured
    /// per-request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a store reusing an existing [`reqwest::Client`] (useful for
    /// sharing a connection pool).
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.config.api_url, path));
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and unwrap the `data` member of a success envelope.
    async fn send<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::from_response(status.as_u16(), &body));
        }
        let envelope = response.json::<DataEnvelope<T>>().await?;
        Ok(envelope.data)
    }

    async fn read<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, StoreError>> + Send,
        T: Send,
    {
        retry_reads(
            operation,
            self.config.read_attempts,
            Duration::from_millis(self.config.retry_backoff_ms),
            op,
        )
        .await
    }
}

/// Run `op` up to `attempts` times while it fails with a retryable error,
/// sleeping `backoff * attempt` between tries.
pub(crate) async fn retry_reads<T, F, Fut>(
    operation: &'static str,
    attempts: u32,
    backoff: Duration,
    mut op: F,
) -> Result<T, StoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StoreError>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_retryable() && attempt < attempts => {
                tracing::warn!(
                    operation,
                    attempt,
                    error = %err,
                    "Appointment store read failed, retrying"
                );
                tokio::time::sleep(backoff * attempt).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_retryable() {
                    tracing::error!(operation, attempts, error = %err, "Appointment store unavailable");
                }
                return Err(err);
            }
            Ok(value) => return Ok(value),
        }
    }
}

#[async_trait]
impl AppointmentStore for HttpAppointmentStore {
    async fn create(&self, booking: &ValidBooking) -> Result<Appointment, StoreError> {
        let body = NewAppointment::from(booking);
        let appointment: Appointment =
            Self::send(self.request(Method::POST, "/appointments").json(&body)).await?;
        tracing::debug!(appointment_id = appointment.id, pet_id = booking.pet_id, "Appointment created");
        Ok(appointment)
    }

    async fn list(&self, query: &AppointmentQuery) -> Result<Vec<Appointment>, StoreError> {
        self.read("list", || {
            Self::send(self.request(Method::GET, "/appointments").query(query))
        })
        .await
    }

    async fn get_by_id(&self, id: DbId) -> Result<Appointment, StoreError> {
        let path = format!("/appointments/{id}");
        self.read("get_by_id", || Self::send(self.request(Method::GET, &path)))
            .await
    }

    async fn cancel(&self, id: DbId) -> Result<Appointment, StoreError> {
        let appointment: Appointment =
            Self::send(self.request(Method::PUT, &format!("/appointments/{id}/cancel"))).await?;
        tracing::debug!(appointment_id = id, "Appointment cancelled");
        Ok(appointment)
    }
}
