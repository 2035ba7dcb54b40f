//! Global Application State Store
//!
//! Uses Leptos reactive_stores for the home screen lookup lists.

use leptos::prelude::*;
use reactive_stores::Store;

use atencion_core::{list, LookupBundle, LookupItem};

/// Home screen lookups with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// "Tipo ID" options
    pub tipos_id_llamada: Vec<LookupItem>,
    pub distritos: Vec<LookupItem>,
    pub sucursales: Vec<LookupItem>,
    /// Last failure loading the lists, shown as a banner
    pub load_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Fill whichever home lists the bundle carries
pub fn store_apply_initial(store: &AppStore, mut bundle: LookupBundle) {
    if bundle.contains(list::TIPO_ID_LLAMADA) {
        store.tipos_id_llamada().set(bundle.take(list::TIPO_ID_LLAMADA));
    }
    if bundle.contains(list::DISTRITOS) {
        store.distritos().set(bundle.take(list::DISTRITOS));
    }
    if bundle.contains(list::SUCURSALES) {
        store.sucursales().set(bundle.take(list::SUCURSALES));
    }
    store.load_error().set(None);
}

pub fn store_set_error(store: &AppStore, message: String) {
    store.load_error().set(Some(message));
}

pub fn tipos_id_llamada(store: AppStore) -> Signal<Vec<LookupItem>> {
    Signal::derive(move || store.tipos_id_llamada().get())
}

pub fn distritos(store: AppStore) -> Signal<Vec<LookupItem>> {
    Signal::derive(move || store.distritos().get())
}

pub fn sucursales(store: AppStore) -> Signal<Vec<LookupItem>> {
    Signal::derive(move || store.sucursales().get())
}

pub fn load_error(store: AppStore) -> Signal<Option<String>> {
    Signal::derive(move || store.load_error().get())
}
