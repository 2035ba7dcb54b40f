//! Parameter Client
//!
//! One authenticated POST per lookup request. The token is obtained per the
//! configured `ReauthPolicy` before every call.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::rc::Rc;

use super::auth::{token_preview, AuthClient};
use super::config::{ApiConfig, ReauthPolicy};
use super::traits::{HttpRequest, HttpTransport, TokenStorage};
use crate::domain::{ApiError, ApiResult, LookupBundle, LookupItem, LookupRequest};

/// Header carrying the token on parameter requests
pub const AUTH_HEADER: &str = "authLDS";

/// `codigo` value for a successful call
const SUCCESS_CODE: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterResponse {
    pub codigo: i64,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub mensaje_usuario: Option<String>,
    #[serde(default)]
    pub entidad: Option<HashMap<String, Vec<LookupItem>>>,
}

impl ParameterResponse {
    fn into_bundle(self) -> ApiResult<LookupBundle> {
        if self.codigo != SUCCESS_CODE {
            let message = self
                .mensaje_usuario
                .filter(|m| !m.is_empty())
                .unwrap_or(self.descripcion);
            return Err(ApiError::Application(message));
        }
        Ok(self.entidad.map(LookupBundle::from).unwrap_or_default())
    }
}

pub struct ParameterClient<T: HttpTransport, S: TokenStorage> {
    auth: AuthClient<T, S>,
    transport: Rc<T>,
    config: Rc<ApiConfig>,
}

impl<T: HttpTransport, S: TokenStorage> ParameterClient<T, S> {
    pub fn new(transport: Rc<T>, storage: S, config: ApiConfig) -> Self {
        let config = Rc::new(config);
        Self {
            auth: AuthClient::new(transport.clone(), storage, config.clone()),
            transport,
            config,
        }
    }

    pub fn auth(&self) -> &AuthClient<T, S> {
        &self.auth
    }

    async fn token(&self) -> ApiResult<String> {
        if self.config.reauth_policy == ReauthPolicy::ReuseStored {
            if let Some(token) = self.auth.current_token() {
                return Ok(token);
            }
        }
        let creds = self
            .config
            .credentials
            .as_ref()
            .ok_or_else(|| ApiError::Auth("Credenciales no configuradas".to_string()))?;
        self.auth.authenticate(&creds.username, &creds.password).await
    }

    /// Fetch the requested lists. Auth failures stop before the parameter
    /// endpoint is contacted.
    pub async fn fetch_lookups(&self, request: &LookupRequest) -> ApiResult<LookupBundle> {
        let token = self.token().await.map_err(|e| {
            log::error!("Error al obtener token para ListarParametro: {}", e);
            e
        })?;
        log::debug!(
            "ListarParametro {:?} con token {}",
            request.names(),
            token_preview(&token)
        );

        let body = serde_json::to_value(request)
            .map_err(|e| ApiError::InvalidResponse(format!("Serialization error: {}", e)))?;
        let http = HttpRequest::post(&self.config.parameters_url, body).header(AUTH_HEADER, &token);

        let response = self.transport.post_json(http).await.map_err(|e| {
            log::error!("Error en ListarParametro: {}", e);
            e
        })?;
        if !response.is_success() {
            log::error!("ListarParametro respondió HTTP {}", response.status);
            return Err(ApiError::Network(format!("HTTP {}", response.status)));
        }

        let parsed: ParameterResponse = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Parse error: {}", e)))?;
        let bundle = parsed.into_bundle()?;
        log::info!("Parámetros cargados: {} listas", bundle.len());
        Ok(bundle)
    }

    /// Home screen lists
    pub async fn initial_lookups(&self) -> ApiResult<LookupBundle> {
        self.fetch_lookups(&LookupRequest::initial()).await
    }

    /// Advanced filter lists
    pub async fn advanced_filter_lookups(&self) -> ApiResult<LookupBundle> {
        self.fetch_lookups(&LookupRequest::advanced_filter()).await
    }
}
