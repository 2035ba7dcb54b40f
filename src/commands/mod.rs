//! Remote Commands
//!
//! Frontend bindings to the LDS parameter API. Each call builds a client
//! from the compile-time config; the token itself persists in localStorage.

mod http;
mod storage;

use std::rc::Rc;

use atencion_core::{ApiError, ApiResult, LookupBundle, LookupRequest, ParameterClient};

use crate::config;
pub use http::GlooTransport;
pub use storage::BrowserTokenStorage;

pub type LdsClient = ParameterClient<GlooTransport, BrowserTokenStorage>;

pub fn client() -> LdsClient {
    let config = config::api_config();
    let storage = BrowserTokenStorage::new(&config.token_storage_key);
    ParameterClient::new(Rc::new(GlooTransport), storage, config)
}

// ========================
// Session
// ========================

/// Make sure a token exists before the first lookup
pub async fn init_session() -> ApiResult<()> {
    let client = client();
    if client.auth().is_authenticated() {
        return Ok(());
    }
    let creds = client
        .auth()
        .config()
        .credentials
        .clone()
        .ok_or_else(|| ApiError::Auth("Credenciales no configuradas".to_string()))?;
    client.auth().authenticate(&creds.username, &creds.password).await?;
    log::info!("Token generado exitosamente");
    Ok(())
}

pub fn logout() {
    client().auth().logout();
}

// ========================
// Lookups
// ========================

pub async fn load_initial_lookups() -> ApiResult<LookupBundle> {
    client().initial_lookups().await
}

pub async fn load_advanced_lookups() -> ApiResult<LookupBundle> {
    client().advanced_filter_lookups().await
}

pub async fn load_lookups(request: LookupRequest) -> ApiResult<LookupBundle> {
    client().fetch_lookups(&request).await
}
