/// Configuración del servidor - todos los parámetros del servicio
///
/// # Variables de entorno
///
/// Todo se puede pisar por entorno:
///
/// | Variable | Default | Descripción |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3001 | Puerto del API HTTP |
/// | ENVIRONMENT | development | Entorno de ejecución |
/// | STORAGE_BACKEND | memory | `sheets` \| `supabase` \| `memory` |
/// | SHEETS_ALUMNOS_ID | - | Spreadsheet de alumnos |
/// | SHEETS_PAGOS_ID | - | Spreadsheet de pagos |
/// | SHEETS_TAB | Hoja 1 | Nombre de la hoja |
/// | GOOGLE_CLIENT_EMAIL | - | Cuenta de servicio |
/// | GOOGLE_PRIVATE_KEY | - | Clave privada (PEM, `\n` escapados) |
/// | GOOGLE_TOKEN_URI | https://oauth2.googleapis.com/token | Token URI |
/// | SUPABASE_URL | - | URL del proyecto |
/// | SUPABASE_KEY | - | API key |
/// | ADMIN_USERNAME / ADMIN_PASSWORD | admin / admin | Credencial del panel |
/// | SMTP_HOST / SMTP_PORT | smtp-relay.brevo.com / 587 | Relay SMTP |
/// | SMTP_USER / SMTP_PASS | - | Credencial SMTP |
/// | SENDER_NAME / SENDER_EMAIL | RM ENTRENADOR / - | Remitente |
/// | CONTACT_PHONE | +54 9 3516 67-1026 | Teléfono del aviso |
/// | REMINDER_ENABLED | true | Scheduler diario on/off |
/// | REMINDER_HOUR | 09:00 | Hora local del disparo |
/// | MAIL_TIMEOUT_MS | 15000 | Timeout por envío |
/// | UTC_OFFSET_HOURS | -3 | Zona horaria del negocio |
/// | MODALIDADES | Presencial,Online,Híbrido | Orden de declaración |
/// | ESTADO_PENDIENTE | true | Regla de cinco estados |
/// | LOG_LEVEL / LOG_DIR | info / - | Logging |
///
/// # Ejemplo
///
/// ```ignore
/// STORAGE_BACKEND=supabase HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Puerto del API HTTP
    pub http_port: u16,
    /// Entorno: development | staging | production
    pub environment: String,

    // === Storage ===
    /// Backend de storage: sheets | supabase | memory
    pub storage_backend: String,
    pub sheets_alumnos_id: String,
    pub sheets_pagos_id: String,
    pub sheets_tab: String,
    pub google_client_email: String,
    pub google_private_key: String,
    pub google_token_uri: String,
    pub supabase_url: String,
    pub supabase_key: String,

    // === Panel ===
    /// Credencial única del panel (no es una frontera de seguridad real)
    pub admin_username: String,
    pub admin_password: String,

    // === Correo ===
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub sender_name: String,
    pub sender_email: String,
    pub contact_phone: String,
    pub reminder_enabled: bool,
    /// Hora local del disparo diario (HH:MM)
    pub reminder_hour: String,
    /// Timeout por envío SMTP (milisegundos)
    pub mail_timeout_ms: u64,

    // === Negocio ===
    /// Offset horario fijo del negocio (Córdoba: -3)
    pub utc_offset_hours: i32,
    /// Modalidades declaradas, en orden (define desempates del panel)
    pub modalidades: Vec<String>,
    /// Regla de cinco estados (con Pendiente) on/off
    pub estado_pendiente: bool,

    // === Logging ===
    pub log_level: String,
    pub log_dir: Option<String>,
}

fn var_or(nombre: &str, default: &str) -> String {
    std::env::var(nombre).unwrap_or_else(|_| default.into())
}

fn parse_or<T: std::str::FromStr>(nombre: &str, default: T) -> T {
    std::env::var(nombre)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Carga la configuración desde el entorno, con defaults para lo que
    /// falte.
    pub fn from_env() -> Self {
        Self {
            http_port: parse_or("HTTP_PORT", 3001),
            environment: var_or("ENVIRONMENT", "development"),

            storage_backend: var_or("STORAGE_BACKEND", "memory"),
            sheets_alumnos_id: var_or("SHEETS_ALUMNOS_ID", ""),
            sheets_pagos_id: var_or("SHEETS_PAGOS_ID", ""),
            sheets_tab: var_or("SHEETS_TAB", "Hoja 1"),
            google_client_email: var_or("GOOGLE_CLIENT_EMAIL", ""),
            google_private_key: var_or("GOOGLE_PRIVATE_KEY", ""),
            google_token_uri: var_or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
            supabase_url: var_or("SUPABASE_URL", ""),
            supabase_key: var_or("SUPABASE_KEY", ""),

            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin"),

            smtp_host: var_or("SMTP_HOST", "smtp-relay.brevo.com"),
            smtp_port: parse_or("SMTP_PORT", 587),
            smtp_user: var_or("SMTP_USER", ""),
            smtp_pass: var_or("SMTP_PASS", ""),
            sender_name: var_or("SENDER_NAME", "RM ENTRENADOR"),
            sender_email: var_or("SENDER_EMAIL", ""),
            contact_phone: var_or("CONTACT_PHONE", "+54 9 3516 67-1026"),
            reminder_enabled: parse_or("REMINDER_ENABLED", true),
            reminder_hour: var_or("REMINDER_HOUR", "09:00"),
            mail_timeout_ms: parse_or("MAIL_TIMEOUT_MS", 15000),

            utc_offset_hours: parse_or("UTC_OFFSET_HOURS", -3),
            modalidades: var_or("MODALIDADES", "Presencial,Online,Híbrido")
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
            estado_pendiente: parse_or("ESTADO_PENDIENTE", true),

            log_level: var_or("LOG_LEVEL", "info"),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Config con valores pisados a mano.
    ///
    /// Pensada para tests (backend en memoria, puerto efímero).
    pub fn with_overrides(storage_backend: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.storage_backend = storage_backend.into();
        config.http_port = http_port;
        config
    }

    /// Reglas del clasificador según config.
    pub fn status_rules(&self) -> crate::subscriptions::StatusRules {
        crate::subscriptions::StatusRules {
            pendiente_habilitado: self.estado_pendiente,
        }
    }

    /// ¿Entorno productivo?
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
