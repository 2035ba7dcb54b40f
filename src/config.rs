//! Build-time Configuration
//!
//! `build.rs` forwards `LDS_*` values from `.env`; anything unset keeps the
//! `ApiConfig` default. Credentials have no default.

use atencion_core::{ApiConfig, FallbackPolicy, ReauthPolicy};

const TOKEN_URL: Option<&str> = option_env!("LDS_TOKEN_URL");
const PARAMETROS_URL: Option<&str> = option_env!("LDS_PARAMETROS_URL");
const USUARIO: Option<&str> = option_env!("LDS_USUARIO");
const PASSWORD: Option<&str> = option_env!("LDS_PASSWORD");
const REAUTH: Option<&str> = option_env!("LDS_REAUTH");
const FALLBACK: Option<&str> = option_env!("LDS_FALLBACK");

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn api_config() -> ApiConfig {
    let mut config = ApiConfig::default();

    if let Some(url) = non_empty(TOKEN_URL) {
        config.token_url = url.to_string();
    }
    if let Some(url) = non_empty(PARAMETROS_URL) {
        config.parameters_url = url.to_string();
    }
    if let (Some(user), Some(password)) = (non_empty(USUARIO), non_empty(PASSWORD)) {
        config = config.with_credentials(user, password);
    }
    if let Some(policy) = non_empty(REAUTH).and_then(ReauthPolicy::parse) {
        config.reauth_policy = policy;
    }
    if let Some(fallback) = non_empty(FALLBACK) {
        config.fallback = match fallback.to_ascii_lowercase().as_str() {
            "explicit" | "explicito" => FallbackPolicy::Explicit,
            _ => FallbackPolicy::SampleData,
        };
    }

    config
}
