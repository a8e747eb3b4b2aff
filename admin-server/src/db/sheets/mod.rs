//! Backend Google Sheets (API v4)
//!
//! La planilla es el storage histórico del sistema: una hoja por tabla,
//! fila 1 de encabezados, datos desde la fila 2. El `id` de un registro
//! es su posición entre las filas de datos (fila 2 → id 1), igual que en
//! el backend original.
//!
//! Operaciones: `values.get` para leer, `values.append` para insertar
//! (`USER_ENTERED` + `INSERT_ROWS`), `values.update` para reemplazar una
//! fila y `batchUpdate`/`deleteDimension` para borrarla corriendo las de
//! abajo hacia arriba.

mod auth;

pub use auth::ServiceAccountAuth;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{RawRow, StoreError, StoreResult, TabularStore};

const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

pub struct SheetsStore {
    http: reqwest::Client,
    auth: Arc<ServiceAccountAuth>,
    spreadsheet_id: String,
    tab: String,
    columnas: &'static [&'static str],
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct AppendResponse {
    updates: AppendUpdates,
}

#[derive(Deserialize)]
struct AppendUpdates {
    #[serde(rename = "updatedRange")]
    updated_range: String,
}

impl SheetsStore {
    pub fn new(
        auth: Arc<ServiceAccountAuth>,
        spreadsheet_id: String,
        tab: String,
        columnas: &'static [&'static str],
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            auth,
            spreadsheet_id,
            tab,
            columnas,
        }
    }

    /// Letra de la última columna usada (A..Z alcanza de sobra acá).
    fn ultima_columna(&self) -> char {
        (b'A' + (self.columnas.len() as u8).saturating_sub(1)) as char
    }

    /// El nombre de hoja puede llevar espacios (`Hoja 1`).
    fn tab_encoded(&self) -> String {
        self.tab.replace(' ', "%20")
    }

    async fn bearer(&self) -> StoreResult<String> {
        self.auth.token().await
    }

    async fn chequear(resp: reqwest::Response) -> StoreResult<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let cuerpo = resp.text().await.unwrap_or_default();
        Err(StoreError::Upstream(format!("Sheets {status}: {cuerpo}")))
    }

    /// Fila de celdas en el orden de columnas configurado.
    fn fila_de(&self, row: &RawRow) -> Vec<String> {
        self.columnas
            .iter()
            .map(|col| celda(row.get(*col)))
            .collect()
    }

    /// Trae encabezados + datos de la hoja completa.
    async fn traer_valores(&self) -> StoreResult<Vec<Vec<String>>> {
        let url = format!(
            "{API_BASE}/{}/values/{}!A1:{}",
            self.spreadsheet_id,
            self.tab_encoded(),
            self.ultima_columna(),
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(self.bearer().await?)
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        let valores: ValuesResponse = resp.json().await?;
        Ok(valores.values)
    }
}

/// Valor JSON → celda de planilla.
fn celda(valor: Option<&Value>) -> String {
    match valor {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Número de fila dentro de un rango tipo `Hoja 1!A5:I5`.
fn fila_de_rango(rango: &str) -> Option<i64> {
    let celdas = rango.rsplit('!').next()?;
    let digitos: String = celdas
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digitos.parse().ok()
}

#[async_trait]
impl TabularStore for SheetsStore {
    async fn fetch_all(&self) -> StoreResult<Vec<RawRow>> {
        let valores = self.traer_valores().await?;
        let Some((encabezados, datos)) = valores.split_first() else {
            return Ok(Vec::new());
        };

        // Las filas totalmente vacías no son registros
        let filas = datos
            .iter()
            .filter(|fila| fila.iter().any(|celda| !celda.trim().is_empty()))
            .enumerate()
            .map(|(i, fila)| {
                let mut row = RawRow::new();
                row.insert("id".to_string(), Value::from(i as i64 + 1));
                for (j, nombre) in encabezados.iter().enumerate() {
                    if nombre.trim().is_empty() {
                        continue;
                    }
                    let valor = fila.get(j).cloned().unwrap_or_default();
                    row.insert(nombre.trim().to_string(), Value::from(valor));
                }
                row
            })
            .collect();

        Ok(filas)
    }

    async fn insert(&self, row: RawRow) -> StoreResult<i64> {
        let url = format!(
            "{API_BASE}/{}/values/{}!A:{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.spreadsheet_id,
            self.tab_encoded(),
            self.ultima_columna(),
        );
        let cuerpo = serde_json::json!({ "values": [self.fila_de(&row)] });

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer().await?)
            .json(&cuerpo)
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        let append: AppendResponse = resp.json().await?;
        let fila = fila_de_rango(&append.updates.updated_range).ok_or_else(|| {
            StoreError::Upstream(format!(
                "updatedRange ilegible: {}",
                append.updates.updated_range
            ))
        })?;

        // fila 2 → id 1
        Ok(fila - 1)
    }

    async fn update(&self, id: i64, row: RawRow) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::InvalidRow(format!("id inválido: {id}")));
        }
        let fila = id + 1;
        let url = format!(
            "{API_BASE}/{}/values/{}!A{fila}:{}{fila}?valueInputOption=USER_ENTERED",
            self.spreadsheet_id,
            self.tab_encoded(),
            self.ultima_columna(),
        );
        let cuerpo = serde_json::json!({ "values": [self.fila_de(&row)] });

        let resp = self
            .http
            .put(url)
            .bearer_auth(self.bearer().await?)
            .json(&cuerpo)
            .send()
            .await?;
        Self::chequear(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::InvalidRow(format!("id inválido: {id}")));
        }
        // Índices 0-based sobre la hoja: la fila de datos `id` vive en el
        // índice `id` (el encabezado ocupa el 0)
        let url = format!("{API_BASE}/{}:batchUpdate", self.spreadsheet_id);
        let cuerpo = serde_json::json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": 0,
                        "dimension": "ROWS",
                        "startIndex": id,
                        "endIndex": id + 1,
                    }
                }
            }]
        });

        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer().await?)
            .json(&cuerpo)
            .send()
            .await?;
        Self::chequear(resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fila_de_rango() {
        assert_eq!(fila_de_rango("Hoja 1!A5:I5"), Some(5));
        assert_eq!(fila_de_rango("'Hoja 1'!A12"), Some(12));
        assert_eq!(fila_de_rango("sin rango"), None);
    }

    #[test]
    fn test_celda() {
        assert_eq!(celda(Some(&Value::from("hola"))), "hola");
        assert_eq!(celda(Some(&Value::from(15000))), "15000");
        assert_eq!(celda(Some(&Value::Null)), "");
        assert_eq!(celda(None), "");
    }
}
