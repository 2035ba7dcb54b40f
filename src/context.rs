//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use atencion_core::{AdvancedFilter, BasicFilter};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Home screen filter being edited
    pub filter: RwSignal<BasicFilter>,
    /// Whether the advanced filter modal is open - read
    pub show_advanced: ReadSignal<bool>,
    /// Whether the advanced filter modal is open - write
    set_show_advanced: WriteSignal<bool>,
    /// Last accepted advanced filter - read
    pub applied_advanced: ReadSignal<Option<AdvancedFilter>>,
    /// Last accepted advanced filter - write
    set_applied_advanced: WriteSignal<Option<AdvancedFilter>>,
}

impl AppContext {
    pub fn new(
        filter: RwSignal<BasicFilter>,
        show_advanced: (ReadSignal<bool>, WriteSignal<bool>),
        applied_advanced: (ReadSignal<Option<AdvancedFilter>>, WriteSignal<Option<AdvancedFilter>>),
    ) -> Self {
        Self {
            filter,
            show_advanced: show_advanced.0,
            set_show_advanced: show_advanced.1,
            applied_advanced: applied_advanced.0,
            set_applied_advanced: applied_advanced.1,
        }
    }

    pub fn open_advanced(&self) {
        self.set_show_advanced.set(true);
    }

    /// Close without touching the applied filter
    pub fn close_advanced(&self) {
        self.set_show_advanced.set(false);
    }

    /// Accept the modal's filter and close it
    pub fn apply_advanced(&self, filter: AdvancedFilter) {
        log::info!("Filtro avanzado aplicado");
        self.set_applied_advanced.set(Some(filter));
        self.set_show_advanced.set(false);
    }

    pub fn clear_advanced(&self) {
        self.set_applied_advanced.set(None);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
