//! Auth Client
//!
//! Obtains bearer tokens from the OAuth endpoint and keeps the last one in
//! memory and in durable storage.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

use super::config::ApiConfig;
use super::traits::{HttpRequest, HttpTransport, TokenStorage};
use crate::domain::{ApiError, ApiResult};

#[derive(Serialize)]
struct TokenRequest<'a> {
    #[serde(rename = "datosToken")]
    datos_token: TokenData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct TokenData<'a> {
    usuario: &'a str,
    password: &'a str,
    key_dominio: &'a str,
    empresa: &'a str,
    empresa_trabaja: &'a str,
    tipo_dispositivo: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(rename = "Token", default)]
    token: Option<String>,
}

/// Shorten a token for log output
pub(crate) fn token_preview(token: &str) -> String {
    let prefix: String = token.chars().take(20).collect();
    format!("{}...", prefix)
}

pub struct AuthClient<T: HttpTransport, S: TokenStorage> {
    transport: Rc<T>,
    storage: S,
    config: Rc<ApiConfig>,
    token: RefCell<Option<String>>,
}

impl<T: HttpTransport, S: TokenStorage> AuthClient<T, S> {
    /// Restores a previously stored token, if any
    pub fn new(transport: Rc<T>, storage: S, config: Rc<ApiConfig>) -> Self {
        let token = storage.load().filter(|t| !t.is_empty());
        if token.is_some() {
            log::debug!("Token restaurado desde almacenamiento");
        }
        Self {
            transport,
            storage,
            config,
            token: RefCell::new(token),
        }
    }

    /// Request a new token. Always hits the network; a success overwrites
    /// the stored token.
    pub async fn authenticate(&self, username: &str, password: &str) -> ApiResult<String> {
        let body = TokenRequest {
            datos_token: TokenData {
                usuario: username,
                password,
                key_dominio: &self.config.key_dominio,
                empresa: &self.config.empresa,
                empresa_trabaja: &self.config.empresa_trabaja,
                tipo_dispositivo: &self.config.tipo_dispositivo,
            },
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Serialization error: {}", e)))?;

        let response = self
            .transport
            .post_json(HttpRequest::post(&self.config.token_url, body))
            .await?;
        if !response.is_success() {
            return Err(ApiError::Network(format!("HTTP {} al generar token", response.status)));
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Parse error: {}", e)))?;
        let token = parsed
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Auth("No se pudo generar el token".to_string()))?;

        log::info!("Token generado: {}", token_preview(&token));
        self.storage.save(&token);
        *self.token.borrow_mut() = Some(token.clone());
        Ok(token)
    }

    pub fn current_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn logout(&self) {
        *self.token.borrow_mut() = None;
        self.storage.clear();
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}
