//! DTOs de autenticación
//!
//! Compartidos entre `api/auth` y los clientes del panel.

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Token de sesión (opaco, sólo habilita la navegación del panel)
    pub token: String,
    pub user: UserInfo,
}

/// Información del usuario autenticado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub display_name: String,
}
