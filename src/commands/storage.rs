//! Token Storage
//!
//! Keeps the raw token string in `localStorage`. When the browser refuses
//! access (some private modes), every operation degrades to a no-op.

use atencion_core::TokenStorage;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub struct BrowserTokenStorage {
    key: String,
}

impl BrowserTokenStorage {
    pub fn new(key: &str) -> Self {
        Self { key: key.to_string() }
    }
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, token: &str) {
        let saved = local_storage().is_some_and(|s| s.set_item(&self.key, token).is_ok());
        if !saved {
            log::warn!("No se pudo guardar el token en localStorage");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
