//! Estado compartido del servidor

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::db::{self, Stores};
use crate::mailing::{MailerService, ReminderScheduler};

/// Estado del servidor - referencias compartidas a todos los servicios
///
/// Clonable barato (todo va detrás de `Arc`); axum lo clona por request.
///
/// | Campo | Descripción |
/// |-------|-------------|
/// | config | Configuración (inmutable) |
/// | stores | Tablas de alumnos y pagos, backend según config |
/// | mailer | Cliente SMTP |
/// | shutdown | Token de cancelación de las tareas de fondo |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub stores: Stores,
    pub mailer: Arc<MailerService>,
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// Inicializa el estado: stores según `STORAGE_BACKEND` + cliente SMTP.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        let stores = db::build_stores(config)?;
        let mailer = Arc::new(MailerService::new(config)?);

        Ok(Self {
            config: Arc::new(config.clone()),
            stores,
            mailer,
            shutdown: CancellationToken::new(),
        })
    }

    /// Estado para tests de integración: backend en memoria, sin red.
    pub fn for_tests(config: Config) -> anyhow::Result<Self> {
        let stores = Stores {
            alumnos: Arc::new(db::memory::MemoryStore::new()),
            pagos: Arc::new(db::memory::MemoryStore::new()),
        };
        let mailer = Arc::new(MailerService::new(&config)?);

        Ok(Self {
            config: Arc::new(config),
            stores,
            mailer,
            shutdown: CancellationToken::new(),
        })
    }

    /// Lanza las tareas de fondo (hoy, sólo el scheduler de
    /// recordatorios). Llamar antes de `Server::run()`.
    pub fn start_background_tasks(&self) {
        if !self.config.reminder_enabled {
            tracing::info!("Scheduler de recordatorios deshabilitado por config");
            return;
        }

        let scheduler = ReminderScheduler::new(self.clone(), self.shutdown.clone());
        tokio::spawn(scheduler.run());
    }

    /// "Hoy" en la zona horaria del negocio.
    pub fn hoy(&self) -> chrono::NaiveDate {
        let offset = crate::mailing::scheduler::offset_de_horas(self.config.utc_offset_hours);
        crate::mailing::scheduler::hoy_local(offset)
    }
}
