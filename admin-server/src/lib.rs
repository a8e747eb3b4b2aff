//! RM Admin Server - backend del panel del entrenador
//!
//! # Arquitectura
//!
//! El servicio expone un API REST sobre dos registros que viven en
//! storage externo (planilla Google o Supabase), deriva el estado de
//! suscripción de cada alumno y corre el job diario de recordatorios.
//!
//! # Estructura de módulos
//!
//! ```text
//! admin-server/src/
//! ├── core/           # configuración, estado, servidor
//! ├── api/            # rutas y handlers HTTP
//! ├── db/             # frontera de storage + repositorios tipados
//! ├── subscriptions/  # clasificador de estado + reconciliación (puro)
//! ├── mailing/        # SMTP, plantilla, job y scheduler
//! └── utils/          # errores, logger, fechas, montos
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod mailing;
pub mod subscriptions;
pub mod utils;

// Re-export de tipos públicos
pub use crate::core::{Config, Server, ServerState};
pub use subscriptions::{StatusRules, classify, reconcile};
pub use utils::{AppError, AppResult};

// Re-export del logger
pub use utils::logger::{init_logger, init_logger_with_file};

/// Prepara el entorno de ejecución: .env + logger.
pub fn setup_environment() {
    // .env es opcional; en producción todo llega por entorno real
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    ____  __  ___   ___       __          _
   / __ \/  |/  /  /   | ____/ /___ ___  (_)___
  / /_/ / /|_/ /  / /| |/ __  / __ `__ \/ / __ \
 / _, _/ /  / /  / ___ / /_/ / / / / / / / / / /
/_/ |_/_/  /_/  /_/  |_\__,_/_/ /_/ /_/_/_/ /_/
    "#
    );
}
