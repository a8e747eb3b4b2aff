use admin_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Entorno (dotenv, logger)
    setup_environment();

    print_banner();

    tracing::info!("🏋️ RM Admin Server iniciando...");

    // 2. Configuración
    let config = Config::from_env();

    // 3. Estado (stores + mailer)
    let state = ServerState::initialize(&config)?;

    // 4. Servidor HTTP (lanza las tareas de fondo)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
