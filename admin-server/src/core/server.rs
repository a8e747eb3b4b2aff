//! Server Implementation
//!
//! Arranque y ciclo de vida del servidor HTTP.

use crate::core::{Config, Result, ServerError, ServerState};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Crea el servidor con un estado ya inicializado (tests, tooling).
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).map_err(ServerError::Internal)?,
        };

        // Tareas de fondo antes de aceptar tráfico
        state.start_background_tasks();

        let app = crate::api::router(state.clone());

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|origen| ServerError::Bind {
                puerto: self.config.http_port,
                origen,
            })?;

        tracing::info!("🏋️ RM Admin Server escuchando en {}", addr);
        tracing::info!(
            backend = %self.config.storage_backend,
            entorno = %self.config.environment,
            "Configuración activa"
        );

        let shutdown = state.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Apagando...");
                shutdown.cancel();
            })
            .await?;

        Ok(())
    }
}
