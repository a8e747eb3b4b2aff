//! Statistics API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{AlumnoConEstado, DashboardStats};

use crate::core::ServerState;
use crate::db::repository::{alumnos, pagos};
use crate::subscriptions::reconcile;
use crate::utils::{AppError, AppResult};

/// Respuesta completa del panel
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResponse {
    pub alumnos: Vec<AlumnoConEstado>,
    pub stats: DashboardStats,
}

/// GET /api/statistics - padrón enriquecido + agregados
///
/// Las dos lecturas son independientes y van en paralelo; la
/// reconciliación recién arranca con ambas listas completas.
pub async fn get_statistics(
    State(state): State<ServerState>,
) -> AppResult<Json<StatisticsResponse>> {
    let (alumnos, pagos) = tokio::join!(
        alumnos::find_all(state.stores.alumnos.as_ref()),
        pagos::find_all(state.stores.pagos.as_ref()),
    );
    let alumnos = alumnos.map_err(AppError::from)?;
    let pagos = pagos.map_err(AppError::from)?;

    let hoy = state.hoy();
    let rules = state.config.status_rules();

    tracing::debug!(
        alumnos = alumnos.len(),
        pagos = pagos.len(),
        %hoy,
        "Reconciliando padrón"
    );

    let (enriquecidos, stats) = reconcile(
        &alumnos,
        &pagos,
        hoy,
        &rules,
        &state.config.modalidades,
    );

    Ok(Json(StatisticsResponse {
        alumnos: enriquecidos,
        stats,
    }))
}
