//! Manejo de errores unificado
//!
//! Provee el tipo de error de aplicación y la estructura de respuesta:
//! - [`AppError`] - enum de errores de la aplicación
//! - [`AppResponse`] - estructura de respuesta de la API
//!
//! # Códigos de error
//!
//! | Prefijo | Categoría | Ejemplo |
//! |---------|-----------|---------|
//! | E0xxx | negocio | E0003 recurso inexistente |
//! | E3xxx | autenticación | E3001 credenciales inválidas |
//! | E9xxx | sistema | E9002 error de storage |
//!
//! # Ejemplo
//!
//! ```ignore
//! // Devolver un error desde un handler
//! Err(AppError::NotFound(format!("Alumno {id}")))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Estructura de respuesta unificada de la API
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Código de error (E0000 = éxito)
    pub code: String,
    /// Mensaje
    pub message: String,
    /// Datos de la respuesta
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Enum de errores de la aplicación
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Autenticación (4xx) ==========
    #[error("Invalid credentials")]
    /// Credenciales inválidas (401)
    InvalidCredentials,

    // ========== Negocio (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Recurso inexistente (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// Validación fallida (400)
    Validation(String),

    #[error("Invalid request: {0}")]
    /// Request inválido (400)
    Invalid(String),

    // ========== Sistema (5xx) ==========
    #[error("Storage error: {0}")]
    /// Falla del storage externo (500) - la única falla dura: sin las
    /// listas de entrada no hay nada que reconciliar
    Storage(String),

    #[error("Mail error: {0}")]
    /// Falla del transporte SMTP (502)
    Mail(String),

    #[error("Internal server error: {0}")]
    /// Error interno (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Usuario o contraseña inválidos".to_string(),
            ),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),

            AppError::Storage(msg) => {
                error!(target: "storage", error = %msg, "Storage error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Error del storage".to_string(),
                )
            }

            AppError::Mail(msg) => {
                error!(target: "mailing", error = %msg, "Mail transport error occurred");
                (
                    StatusCode::BAD_GATEWAY,
                    "E9003",
                    "Error enviando correo".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Error interno".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<crate::db::StoreError> for AppError {
    fn from(e: crate::db::StoreError) -> Self {
        match e {
            crate::db::StoreError::NotFound(msg) => AppError::NotFound(msg),
            crate::db::StoreError::InvalidRow(msg) => AppError::Validation(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Resultado estándar de los handlers
pub type AppResult<T> = Result<T, AppError>;
