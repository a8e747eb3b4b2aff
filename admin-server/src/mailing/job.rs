//! Job de recordatorios de vencimiento
//!
//! Selección de candidatos + vuelta de envíos. La selección es pura y
//! reutiliza sólo la comparación de vencimiento (no el clasificador
//! completo): acá "vencido" es vencimiento alcanzado, incluido el mismo
//! día, que es exactamente cuando conviene avisar.

use std::future::Future;

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{Alumno, Pago};

use crate::db::{Stores, repository};
use crate::utils::dates::parse_fecha_opt;
use crate::utils::{AppError, AppResult};

use super::MailerService;

/// Etiqueta de estado que viaja en el aviso
const ESTADO_AVISO: &str = "VENCIDO";

/// Candidato a recordatorio
#[derive(Debug, Clone, Serialize)]
pub struct AlumnoVencido {
    pub alumno_id: i64,
    pub nombre: String,
    pub email: String,
    pub modalidad: String,
    /// Último vencimiento, formateado `DD/MM/YYYY` para el correo
    pub fecha_vencimiento: String,
    pub dias_vencido: i64,
}

/// Resumen de una corrida del job
#[derive(Debug, Clone, Serialize)]
pub struct ReminderReport {
    pub vencidos: usize,
    pub enviados: usize,
    pub fallidos: usize,
}

/// Selecciona los alumnos con el último vencimiento alcanzado.
///
/// Sin email o sin pagos con vencimiento parseable no hay aviso posible:
/// se saltean sin ruido. El último vencimiento se toma sobre las fechas
/// válidas del grupo.
pub fn collect_overdue(alumnos: &[Alumno], pagos: &[Pago], hoy: NaiveDate) -> Vec<AlumnoVencido> {
    alumnos
        .iter()
        .filter_map(|alumno| {
            let email = alumno.email.as_deref()?.to_string();

            let ultimo_vencimiento = pagos
                .iter()
                .filter(|p| p.alumno_id == alumno.id)
                .filter_map(|p| parse_fecha_opt(p.fecha_de_vencimiento.as_deref()))
                .max()?;

            if ultimo_vencimiento > hoy {
                return None;
            }

            Some(AlumnoVencido {
                alumno_id: alumno.id,
                nombre: alumno.nombre.clone(),
                email,
                modalidad: alumno.modalidad.clone(),
                fecha_vencimiento: ultimo_vencimiento.format("%d/%m/%Y").to_string(),
                dias_vencido: (hoy - ultimo_vencimiento).num_days(),
            })
        })
        .collect()
}

/// Vuelta de envíos, secuencial y resistente: cada falla se loguea y se
/// sigue con el próximo. Un SMTP rebotando a un alumno no puede dejar
/// sin aviso al resto.
async fn enviar_avisos<F, Fut>(vencidos: &[AlumnoVencido], enviar: F) -> (usize, usize)
where
    F: Fn(AlumnoVencido) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut enviados = 0usize;
    let mut fallidos = 0usize;

    for alumno in vencidos {
        match enviar(alumno.clone()).await {
            Ok(()) => enviados += 1,
            Err(e) => {
                fallidos += 1;
                tracing::error!(
                    alumno = %alumno.nombre,
                    email = %alumno.email,
                    error = %e,
                    "Falló el envío, se continúa con el resto"
                );
            }
        }
    }

    (enviados, fallidos)
}

/// Corre el job completo: trae datos, selecciona y envía.
pub async fn run(stores: &Stores, mailer: &MailerService, hoy: NaiveDate) -> AppResult<ReminderReport> {
    let (alumnos, pagos) = tokio::join!(
        repository::alumnos::find_all(stores.alumnos.as_ref()),
        repository::pagos::find_all(stores.pagos.as_ref()),
    );
    let alumnos = alumnos.map_err(AppError::from)?;
    let pagos = pagos.map_err(AppError::from)?;

    let vencidos = collect_overdue(&alumnos, &pagos, hoy);
    tracing::info!(cantidad = vencidos.len(), "Alumnos con plan vencido");

    let (enviados, fallidos) = enviar_avisos(&vencidos, |alumno| async move {
        mailer
            .send_aviso_vencido(
                &alumno.email,
                &alumno.nombre,
                ESTADO_AVISO,
                &alumno.fecha_vencimiento,
                &alumno.modalidad,
            )
            .await
    })
    .await;

    tracing::info!(enviados, fallidos, "Recordatorios procesados");

    Ok(ReminderReport {
        vencidos: vencidos.len(),
        enviados,
        fallidos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::dates::parse_fecha;

    fn fecha(s: &str) -> NaiveDate {
        parse_fecha(s).unwrap()
    }

    fn alumno(id: i64, nombre: &str, email: Option<&str>) -> Alumno {
        Alumno {
            id,
            nombre: nombre.to_string(),
            modalidad: "Presencial".to_string(),
            fecha_de_nacimiento: None,
            telefono: None,
            dias: None,
            fecha_de_inicio: None,
            ultima_antro: None,
            plan: None,
            email: email.map(str::to_string),
        }
    }

    fn pago(id: i64, alumno_id: i64, venc: &str) -> Pago {
        Pago {
            id,
            alumno_id,
            nombre: None,
            monto: 0.0,
            fecha_de_pago: None,
            fecha_de_vencimiento: Some(venc.to_string()),
            modalidad: None,
            telefono: None,
        }
    }

    #[test]
    fn test_vencido_hace_dias() {
        let alumnos = vec![alumno(1, "Carlos", Some("carlos@mail.com"))];
        let pagos = vec![pago(1, 1, "2024-01-31")];

        let vencidos = collect_overdue(&alumnos, &pagos, fecha("2024-02-05"));
        assert_eq!(vencidos.len(), 1);
        assert_eq!(vencidos[0].dias_vencido, 5);
        assert_eq!(vencidos[0].fecha_vencimiento, "31/01/2024");
    }

    #[test]
    fn test_vence_hoy_tambien_avisa() {
        let alumnos = vec![alumno(1, "Carlos", Some("carlos@mail.com"))];
        let pagos = vec![pago(1, 1, "2024-02-05")];

        let vencidos = collect_overdue(&alumnos, &pagos, fecha("2024-02-05"));
        assert_eq!(vencidos.len(), 1);
        assert_eq!(vencidos[0].dias_vencido, 0);
    }

    #[test]
    fn test_cuenta_el_ultimo_vencimiento() {
        // Renovó: el vencimiento nuevo todavía no llegó
        let alumnos = vec![alumno(1, "Carlos", Some("carlos@mail.com"))];
        let pagos = vec![pago(1, 1, "2024-01-10"), pago(2, 1, "2024-03-10")];

        let vencidos = collect_overdue(&alumnos, &pagos, fecha("2024-02-05"));
        assert!(vencidos.is_empty());
    }

    #[test]
    fn test_sin_email_se_saltea() {
        let alumnos = vec![alumno(1, "Carlos", None)];
        let pagos = vec![pago(1, 1, "2024-01-10")];
        assert!(collect_overdue(&alumnos, &pagos, fecha("2024-02-05")).is_empty());
    }

    #[test]
    fn test_sin_pagos_se_saltea() {
        let alumnos = vec![alumno(1, "Carlos", Some("carlos@mail.com"))];
        assert!(collect_overdue(&alumnos, &[], fecha("2024-02-05")).is_empty());
    }

    #[test]
    fn test_vencimientos_ilegibles_no_cuentan() {
        let alumnos = vec![alumno(1, "Carlos", Some("carlos@mail.com"))];
        let roto = pago(1, 1, "sin fecha");
        assert!(collect_overdue(&alumnos, &[roto], fecha("2024-02-05")).is_empty());
    }

    fn vencido(email: &str) -> AlumnoVencido {
        AlumnoVencido {
            alumno_id: 1,
            nombre: "Alguien".to_string(),
            email: email.to_string(),
            modalidad: "Online".to_string(),
            fecha_vencimiento: "31/01/2024".to_string(),
            dias_vencido: 5,
        }
    }

    #[tokio::test]
    async fn test_una_falla_no_frena_la_vuelta() {
        let vencidos = vec![
            vencido("ana@mail.com"),
            vencido("rebota@mail.com"),
            vencido("carlos@mail.com"),
        ];

        let (enviados, fallidos) = enviar_avisos(&vencidos, |a| async move {
            if a.email.starts_with("rebota") {
                Err(AppError::Mail("rebote".to_string()))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(enviados, 2);
        assert_eq!(fallidos, 1);
    }
}
