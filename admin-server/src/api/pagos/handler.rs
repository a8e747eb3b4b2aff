//! Pago API Handlers
//!
//! El listado devuelve cada pago con su estado derivado: el estado nunca
//! se guarda, se clasifica contra "hoy" en cada lectura.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Pago, PagoConEstado, PagoCreate, PagoUpdate};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::pagos;
use crate::subscriptions::classify;
use crate::utils::dates::parse_fecha_opt;
use crate::utils::{AppError, AppResult};

/// GET /api/pagos - listado con estado derivado
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PagoConEstado>>> {
    let hoy = state.hoy();
    let rules = state.config.status_rules();

    let pagos = pagos::find_all(state.stores.pagos.as_ref()).await?;
    let con_estado = pagos
        .into_iter()
        .map(|pago| {
            let estado = classify(
                parse_fecha_opt(pago.fecha_de_pago.as_deref()),
                parse_fecha_opt(pago.fecha_de_vencimiento.as_deref()),
                hoy,
                &rules,
            );
            PagoConEstado { pago, estado }
        })
        .collect();

    Ok(Json(con_estado))
}

/// POST /api/pagos - alta
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PagoCreate>,
) -> AppResult<Json<Pago>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pago = pagos::create(state.stores.pagos.as_ref(), payload).await?;
    tracing::info!(id = pago.id, alumno_id = pago.alumno_id, "Pago registrado");
    Ok(Json(pago))
}

/// PUT /api/pagos/:id - edición (reemplazo completo)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PagoUpdate>,
) -> AppResult<Json<Pago>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let pago = pagos::update(state.stores.pagos.as_ref(), id, payload).await?;
    tracing::info!(id, "Pago actualizado");
    Ok(Json(pago))
}

/// DELETE /api/pagos/:id - baja, independiente del alumno
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let borrado = pagos::delete(state.stores.pagos.as_ref(), id).await?;
    if borrado {
        tracing::info!(id, "Pago eliminado");
    }
    Ok(Json(borrado))
}
