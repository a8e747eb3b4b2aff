//! Alumno API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Alumno, AlumnoCreate, AlumnoUpdate};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::alumnos;
use crate::utils::{AppError, AppResult};

/// GET /api/alumnos - listado completo, ordenado por nombre
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Alumno>>> {
    let alumnos = alumnos::find_all(state.stores.alumnos.as_ref()).await?;
    Ok(Json(alumnos))
}

/// POST /api/alumnos - alta
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AlumnoCreate>,
) -> AppResult<Json<Alumno>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let alumno = alumnos::create(state.stores.alumnos.as_ref(), payload).await?;
    tracing::info!(id = alumno.id, nombre = %alumno.nombre, "Alumno creado");
    Ok(Json(alumno))
}

/// PUT /api/alumnos/:id - edición (reemplazo completo)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AlumnoUpdate>,
) -> AppResult<Json<Alumno>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let alumno = alumnos::update(state.stores.alumnos.as_ref(), id, payload).await?;
    tracing::info!(id, "Alumno actualizado");
    Ok(Json(alumno))
}

/// DELETE /api/alumnos/:id - baja (no arrastra los pagos del alumno)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let borrado = alumnos::delete(state.stores.alumnos.as_ref(), id).await?;
    if borrado {
        tracing::info!(id, "Alumno eliminado");
    }
    Ok(Json(borrado))
}
