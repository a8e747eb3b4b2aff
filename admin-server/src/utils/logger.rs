//! Infraestructura de logging
//!
//! Configuración de logging estructurado para desarrollo y producción.

use std::path::Path;

/// Inicializa el logger con el nivel por defecto
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Inicializa el logger, opcionalmente con salida a archivo rotativo diario
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Salida a archivo si log_dir existe
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "admin-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
