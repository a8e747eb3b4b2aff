//! Scheduler diario de recordatorios
//!
//! Dispara el job una vez por día a la hora configurada
//! (`REMINDER_HOUR`, zona horaria = offset fijo de config). El loop es
//! cancelable por shutdown, igual que el resto de las tareas de fondo.

use std::time::Duration;

use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;

use super::job;

pub struct ReminderScheduler {
    state: ServerState,
    shutdown: CancellationToken,
}

impl ReminderScheduler {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Loop principal: espera el próximo disparo o el shutdown.
    pub async fn run(self) {
        let hora = parse_hora(&self.state.config.reminder_hour);
        let offset = offset_de_horas(self.state.config.utc_offset_hours);

        tracing::info!(
            hora = %hora,
            offset_horas = self.state.config.utc_offset_hours,
            "Scheduler de recordatorios iniciado"
        );

        loop {
            let espera = duracion_hasta_proximo(hora, offset);
            tracing::info!(
                minutos = espera.as_secs() / 60,
                "Próximo recordatorio programado"
            );

            tokio::select! {
                _ = tokio::time::sleep(espera) => {}
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Scheduler de recordatorios detenido");
                    return;
                }
            }

            let hoy = hoy_local(offset);
            match job::run(&self.state.stores, &self.state.mailer, hoy).await {
                Ok(reporte) => tracing::info!(
                    vencidos = reporte.vencidos,
                    enviados = reporte.enviados,
                    fallidos = reporte.fallidos,
                    "Corrida diaria de recordatorios completada"
                ),
                Err(e) => tracing::error!(error = %e, "Corrida diaria de recordatorios falló"),
            }
        }
    }
}

/// Parsea `HH:MM`; ante formato roto cae a las 09:00.
pub fn parse_hora(hora: &str) -> NaiveTime {
    NaiveTime::parse_from_str(hora, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "REMINDER_HOUR '{}' ilegible: {}, usando 09:00",
            hora,
            e
        );
        NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
    })
}

/// Offset fijo en horas → `FixedOffset`. Fuera de rango cae a UTC.
pub fn offset_de_horas(horas: i32) -> FixedOffset {
    FixedOffset::east_opt(horas * 3600).unwrap_or_else(|| {
        tracing::warn!("UTC_OFFSET_HOURS {} fuera de rango, usando UTC", horas);
        FixedOffset::east_opt(0).expect("offset cero siempre es válido")
    })
}

/// Fecha calendario actual en la zona del negocio.
pub fn hoy_local(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// Cuánto falta para el próximo disparo a `hora` en la zona dada.
fn duracion_hasta_proximo(hora: NaiveTime, offset: FixedOffset) -> Duration {
    let ahora = Utc::now().with_timezone(&offset);
    let hoy = ahora.date_naive();

    let mut proximo = hoy.and_time(hora);
    if ahora.naive_local() >= proximo {
        proximo += chrono::Duration::days(1);
    }

    let falta = proximo - ahora.naive_local();
    falta.to_std().unwrap_or(Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hora() {
        assert_eq!(parse_hora("09:30"), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        // Formato roto cae al default
        assert_eq!(parse_hora("9am"), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_offset_fuera_de_rango() {
        assert_eq!(offset_de_horas(99), FixedOffset::east_opt(0).unwrap());
        assert_eq!(offset_de_horas(-3), FixedOffset::east_opt(-3 * 3600).unwrap());
    }

    #[test]
    fn test_duracion_acotada_a_un_dia() {
        let hora = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let offset = offset_de_horas(-3);
        let falta = duracion_hasta_proximo(hora, offset);
        assert!(falta <= Duration::from_secs(24 * 3600));
    }
}
