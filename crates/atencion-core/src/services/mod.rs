//! Services Layer
//!
//! Token auth and lookup fetching. The browser specifics (HTTP, storage)
//! come in through the traits in `traits`.

mod traits;
mod config;
mod auth;
mod parameters;
mod tests;

pub use traits::{HttpRequest, HttpResponse, HttpTransport, MemoryTokenStorage, TokenStorage};
pub use config::{ApiConfig, Credentials, ReauthPolicy};
pub use auth::AuthClient;
pub use parameters::{ParameterClient, ParameterResponse};
