//! Service Layer - Core Traits
//!
//! Abstract transport and token persistence so the clients run the same
//! against `gloo-net` in the browser and against mocks in tests.

use async_trait::async_trait;
use std::cell::RefCell;

use crate::domain::ApiResult;

/// A JSON POST
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl HttpRequest {
    pub fn post(url: &str, body: serde_json::Value) -> Self {
        Self {
            url: url.to_string(),
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests; transport failures map to `ApiError::Network`.
/// Single-threaded: browser futures are not `Send`.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn post_json(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Durable slot for the last issued token
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Non-durable storage, for tests and storage-less environments
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}

impl<S: TokenStorage + ?Sized> TokenStorage for std::rc::Rc<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, token: &str) {
        (**self).save(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}
