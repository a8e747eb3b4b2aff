//! Frontera de storage
//!
//! El storage es un colaborador externo (planilla Google o Supabase) y
//! acá se lo consume por una interfaz mínima: traer todas las filas,
//! insertar, actualizar por id, borrar por id, siempre sobre mapas
//! planos de campos. La normalización de nombres de campo a los modelos
//! tipados vive en [`repository`], y se hace una sola vez.

pub mod memory;
pub mod repository;
pub mod sheets;
pub mod supabase;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::core::Config;

/// Una fila cruda del storage: mapa plano campo → valor.
///
/// Siempre trae `id`. Los valores pueden ser strings (celdas de
/// planilla) o números/null (JSON de Supabase); el repositorio acepta
/// ambas formas.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

/// Errores de la frontera de storage
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Auth error: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Upstream(err.to_string())
    }
}

/// Resultado de las operaciones de storage
pub type StoreResult<T> = Result<T, StoreError>;

/// Operaciones sobre una tabla remota de registros planos.
///
/// Una instancia = una tabla (alumnos o pagos). `insert` devuelve el id
/// asignado por el storage.
#[async_trait]
pub trait TabularStore: Send + Sync {
    async fn fetch_all(&self) -> StoreResult<Vec<RawRow>>;
    async fn insert(&self, row: RawRow) -> StoreResult<i64>;
    async fn update(&self, id: i64, row: RawRow) -> StoreResult<()>;
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

/// Las dos tablas del sistema, ya conectadas al backend configurado.
#[derive(Clone)]
pub struct Stores {
    pub alumnos: Arc<dyn TabularStore>,
    pub pagos: Arc<dyn TabularStore>,
}

/// Orden de columnas de la planilla de alumnos (encabezados de `Hoja 1`)
pub const COLUMNAS_ALUMNOS: &[&str] = &[
    "nombre",
    "modalidad",
    "fecha_de_nacimiento",
    "telefono",
    "plan",
    "dias",
    "fecha_de_inicio",
    "ultima_antro",
    "email",
];

/// Orden de columnas de la planilla de pagos
pub const COLUMNAS_PAGOS: &[&str] = &[
    "alumno_id",
    "nombre",
    "monto",
    "fecha_de_pago",
    "fecha_de_vencimiento",
    "modalidad",
    "telefono",
];

/// Construye los stores según `STORAGE_BACKEND`.
pub fn build_stores(config: &Config) -> anyhow::Result<Stores> {
    match config.storage_backend.as_str() {
        "sheets" => {
            let auth = Arc::new(sheets::ServiceAccountAuth::from_config(config)?);
            let alumnos = sheets::SheetsStore::new(
                auth.clone(),
                config.sheets_alumnos_id.clone(),
                config.sheets_tab.clone(),
                COLUMNAS_ALUMNOS,
            );
            let pagos = sheets::SheetsStore::new(
                auth,
                config.sheets_pagos_id.clone(),
                config.sheets_tab.clone(),
                COLUMNAS_PAGOS,
            );
            Ok(Stores {
                alumnos: Arc::new(alumnos),
                pagos: Arc::new(pagos),
            })
        }
        "supabase" => {
            let alumnos = supabase::SupabaseStore::new(
                config.supabase_url.clone(),
                config.supabase_key.clone(),
                "alumnos",
            );
            let pagos = supabase::SupabaseStore::new(
                config.supabase_url.clone(),
                config.supabase_key.clone(),
                "pagos",
            );
            Ok(Stores {
                alumnos: Arc::new(alumnos),
                pagos: Arc::new(pagos),
            })
        }
        "memory" => Ok(Stores {
            alumnos: Arc::new(memory::MemoryStore::new()),
            pagos: Arc::new(memory::MemoryStore::new()),
        }),
        otro => anyhow::bail!("STORAGE_BACKEND desconocido: {otro}"),
    }
}
