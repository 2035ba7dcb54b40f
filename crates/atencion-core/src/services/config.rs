//! API Configuration
//!
//! Endpoints, token request constants and the two behaviour switches
//! (re-auth and list fallback). Credentials are never defaulted.

use serde::{Deserialize, Serialize};

use crate::domain::FallbackPolicy;

pub const DEFAULT_TOKEN_URL: &str = "/Interno/PlatafWeb/OAuth/OAuth.svc/Token/GenerarToken";
pub const DEFAULT_PARAMETERS_URL: &str = "/Home/ListarParametro";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "authLDS_token";

/// When the parameter client asks for a fresh token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReauthPolicy {
    /// New token before every parameter request
    #[default]
    Always,
    /// Reuse the in-memory token while there is one
    ReuseStored,
}

impl ReauthPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" | "siempre" => Some(Self::Always),
            "reuse" | "reuse_stored" | "reutilizar" => Some(Self::ReuseStored),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub token_url: String,
    pub parameters_url: String,
    pub token_storage_key: String,
    pub credentials: Option<Credentials>,
    pub key_dominio: String,
    pub empresa: String,
    pub empresa_trabaja: String,
    pub tipo_dispositivo: String,
    pub reauth_policy: ReauthPolicy,
    pub fallback: FallbackPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            parameters_url: DEFAULT_PARAMETERS_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            credentials: None,
            key_dominio: "LDS".to_string(),
            empresa: "7".to_string(),
            empresa_trabaja: "7".to_string(),
            tipo_dispositivo: "WEB".to_string(),
            reauth_policy: ReauthPolicy::default(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn with_credentials(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }
}
