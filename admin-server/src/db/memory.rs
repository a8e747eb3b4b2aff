//! Store en memoria
//!
//! Backend de desarrollo y doble de pruebas para los tests de
//! integración: misma interfaz, sin red. Ids autoincrementales.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{RawRow, StoreError, StoreResult, TabularStore};

pub struct MemoryStore {
    filas: RwLock<Vec<RawRow>>,
    proximo_id: RwLock<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            filas: RwLock::new(Vec::new()),
            proximo_id: RwLock::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TabularStore for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<RawRow>> {
        Ok(self.filas.read().await.clone())
    }

    async fn insert(&self, mut row: RawRow) -> StoreResult<i64> {
        let mut proximo = self.proximo_id.write().await;
        let id = *proximo;
        *proximo += 1;

        row.insert("id".to_string(), Value::from(id));
        self.filas.write().await.push(row);
        Ok(id)
    }

    async fn update(&self, id: i64, mut row: RawRow) -> StoreResult<()> {
        let mut filas = self.filas.write().await;
        let fila = filas
            .iter_mut()
            .find(|f| f.get("id").and_then(Value::as_i64) == Some(id))
            .ok_or_else(|| StoreError::NotFound(format!("fila {id}")))?;

        row.insert("id".to_string(), Value::from(id));
        *fila = row;
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut filas = self.filas.write().await;
        let antes = filas.len();
        filas.retain(|f| f.get("id").and_then(Value::as_i64) != Some(id));
        if filas.len() == antes {
            return Err(StoreError::NotFound(format!("fila {id}")));
        }
        Ok(())
    }
}
