//! OAuth de cuenta de servicio para la API de Sheets
//!
//! Flujo estándar de Google: assertion JWT firmada RS256 con la clave
//! privada de la cuenta de servicio, canjeada por un access token en el
//! token URI. El token se cachea hasta cerca de su expiración.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::core::Config;
use crate::db::{StoreError, StoreResult};

const SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Margen antes de la expiración real para renovar el token
const MARGEN_RENOVACION_SEGS: i64 = 60;

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct TokenCache {
    access_token: String,
    /// Unix seconds
    expira_en: i64,
}

pub struct ServiceAccountAuth {
    http: reqwest::Client,
    client_email: String,
    token_uri: String,
    clave: EncodingKey,
    cache: RwLock<Option<TokenCache>>,
}

impl ServiceAccountAuth {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        // La clave suele venir de un .env con los saltos escapados
        let pem = config.google_private_key.replace("\\n", "\n");
        let clave = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| anyhow::anyhow!("GOOGLE_PRIVATE_KEY inválida: {e}"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            client_email: config.google_client_email.clone(),
            token_uri: config.google_token_uri.clone(),
            clave,
            cache: RwLock::new(None),
        })
    }

    /// Devuelve un access token vigente, renovándolo si hace falta.
    pub async fn token(&self) -> StoreResult<String> {
        let ahora = chrono::Utc::now().timestamp();

        if let Some(cacheado) = self.cache.read().await.as_ref()
            && cacheado.expira_en - MARGEN_RENOVACION_SEGS > ahora
        {
            return Ok(cacheado.access_token.clone());
        }

        let nuevo = self.canjear_assertion(ahora).await?;
        let token = nuevo.access_token.clone();
        *self.cache.write().await = Some(TokenCache {
            access_token: nuevo.access_token,
            expira_en: ahora + nuevo.expires_in,
        });
        Ok(token)
    }

    async fn canjear_assertion(&self, ahora: i64) -> StoreResult<TokenResponse> {
        let claims = Claims {
            iss: &self.client_email,
            scope: SCOPE,
            aud: &self.token_uri,
            iat: ahora,
            exp: ahora + 3600,
        };

        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.clave)
            .map_err(|e| StoreError::Auth(format!("no se pudo firmar la assertion: {e}")))?;

        let resp = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let cuerpo = resp.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "canje de token falló ({status}): {cuerpo}"
            )));
        }

        Ok(resp.json().await?)
    }
}
