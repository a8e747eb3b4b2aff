//! Authentication Handlers
//!
//! El panel se protege con una única credencial de entorno: es una
//! traba de navegación, no una frontera de seguridad. El token es un
//! uuid opaco que el front guarda para habilitar el dashboard.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Demora fija para emparejar tiempos de respuesta en el login
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // Demora fija antes de evaluar, para no filtrar por timing
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let valido = req.username == state.config.admin_username
        && req.password == state.config.admin_password;

    if !valido {
        tracing::warn!(username = %req.username, "Login fallido");
        // Mensaje unificado: no se distingue usuario de contraseña
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(username = %req.username, "Login exitoso");

    Ok(Json(LoginResponse {
        token: uuid::Uuid::new_v4().to_string(),
        user: UserInfo {
            username: req.username.clone(),
            display_name: state.config.sender_name.clone(),
        },
    }))
}
