pub mod appointments;
pub mod auth;
pub mod health;
pub mod medical_records;
pub mod pets;
pub mod services;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user (requires auth)
///
/// /pets                                            list, create
/// /pets/{id}                                       get, update, delete
/// /pets/{id}/medical-records                       list records for pet
///
/// /services                                        list active catalog
/// /services/{id}                                   get
///
/// /appointments                                    list (filterable), create
/// /appointments/{id}                               get (joined with pet)
/// /appointments/{id}/confirm                       pending -> confirmed (PUT)
/// /appointments/{id}/cancel                        pending|confirmed -> cancelled (PUT)
///
/// /medical-records                                 create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/pets", pets::router())
        .nest("/services", services::router())
        .nest("/appointments", appointments::router())
        .nest("/medical-records", medical_records::router())
}
