//! Módulo de rutas del API
//!
//! # Estructura
//!
//! - [`health`] - chequeo de salud
//! - [`auth`] - login del panel
//! - [`alumnos`] - CRUD de alumnos
//! - [`pagos`] - CRUD de pagos
//! - [`statistics`] - reconciliación + estadísticas del panel
//! - [`mailing`] - disparo manual de recordatorios

pub mod alumnos;
pub mod auth;
pub mod health;
pub mod mailing;
pub mod pagos;
pub mod statistics;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

// Re-export de tipos comunes para los handlers
pub use crate::utils::AppResult;

/// Router completo de la aplicación.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(alumnos::router())
        .merge(pagos::router())
        .merge(statistics::router())
        .merge(mailing::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
