//! Backend Supabase (PostgREST)
//!
//! La revisión más nueva del sistema original guarda alumnos y pagos en
//! Supabase; acá se habla directo con su capa REST:
//! `GET/POST/PATCH/DELETE {url}/rest/v1/{tabla}` con los headers
//! `apikey` + `Authorization: Bearer`.

use async_trait::async_trait;
use serde_json::Value;

use super::{RawRow, StoreError, StoreResult, TabularStore};

pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    tabla: &'static str,
}

impl SupabaseStore {
    pub fn new(base_url: String, api_key: String, tabla: &'static str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            tabla,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.tabla)
    }

    fn con_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn chequear(resp: reqwest::Response) -> StoreResult<reqwest::Response> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let cuerpo = resp.text().await.unwrap_or_default();
        Err(StoreError::Upstream(format!(
            "PostgREST {status}: {cuerpo}"
        )))
    }
}

#[async_trait]
impl TabularStore for SupabaseStore {
    async fn fetch_all(&self) -> StoreResult<Vec<RawRow>> {
        let resp = self
            .con_auth(self.http.get(self.endpoint()).query(&[("select", "*")]))
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        let filas: Vec<RawRow> = resp.json().await?;
        Ok(filas)
    }

    async fn insert(&self, row: RawRow) -> StoreResult<i64> {
        let resp = self
            .con_auth(self.http.post(self.endpoint()))
            .header("Prefer", "return=representation")
            .json(&Value::Object(row))
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        // PostgREST devuelve un array con la fila insertada
        let filas: Vec<RawRow> = resp.json().await?;
        filas
            .first()
            .and_then(|f| f.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                StoreError::InvalidRow(format!("insert en {} sin id en la respuesta", self.tabla))
            })
    }

    async fn update(&self, id: i64, row: RawRow) -> StoreResult<()> {
        let resp = self
            .con_auth(
                self.http
                    .patch(self.endpoint())
                    .query(&[("id", format!("eq.{id}"))]),
            )
            .header("Prefer", "return=representation")
            .json(&Value::Object(row))
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        let filas: Vec<RawRow> = resp.json().await?;
        if filas.is_empty() {
            return Err(StoreError::NotFound(format!("{} {id}", self.tabla)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let resp = self
            .con_auth(
                self.http
                    .delete(self.endpoint())
                    .query(&[("id", format!("eq.{id}"))]),
            )
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let resp = Self::chequear(resp).await?;

        let filas: Vec<RawRow> = resp.json().await?;
        if filas.is_empty() {
            return Err(StoreError::NotFound(format!("{} {id}", self.tabla)));
        }
        Ok(())
    }
}
