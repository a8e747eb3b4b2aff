//! Mailing API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::mailing::job;
use crate::utils::AppResult;

/// Resultado del disparo manual
#[derive(Debug, Serialize)]
pub struct RecordatoriosResponse {
    pub message: String,
    pub vencidos: usize,
    pub enviados: usize,
    pub fallidos: usize,
}

/// POST /api/mailing/recordatorios - corre el job ahora
pub async fn enviar_recordatorios(
    State(state): State<ServerState>,
) -> AppResult<Json<RecordatoriosResponse>> {
    let reporte = job::run(&state.stores, &state.mailer, state.hoy()).await?;

    Ok(Json(RecordatoriosResponse {
        message: "Proceso finalizado".to_string(),
        vencidos: reporte.vencidos,
        enviados: reporte.enviados,
        fallidos: reporte.fallidos,
    }))
}
