//! Ruta de chequeo de salud
//!
//! | Ruta | Método | Auth |
//! |------|--------|------|
//! | /api/health | GET | no |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::time::SystemTime;

use crate::core::ServerState;

/// Rutas públicas de salud
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// Respuesta del chequeo de salud
#[derive(Serialize)]
pub struct HealthResponse {
    /// Estado (healthy | degraded)
    status: &'static str,
    version: &'static str,
    /// Backend de storage activo
    storage_backend: String,
    /// Tiempo en línea (segundos)
    uptime_seconds: u64,
}

// Momento de arranque (estático perezoso)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn uptime_seconds() -> u64 {
    let inicio = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*inicio)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Chequeo básico
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage_backend: state.config.storage_backend.clone(),
        uptime_seconds: uptime_seconds(),
    })
}
