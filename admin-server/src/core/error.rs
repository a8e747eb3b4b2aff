//! Errores de arranque del servidor

use thiserror::Error;

/// Errores fatales del ciclo de vida del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuración inválida: {0}")]
    Config(String),

    #[error("No se pudo escuchar en el puerto {puerto}: {origen}")]
    Bind {
        puerto: u16,
        #[source]
        origen: std::io::Error,
    },

    #[error("Error de I/O del servidor: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Resultado del arranque
pub type Result<T> = std::result::Result<T, ServerError>;
