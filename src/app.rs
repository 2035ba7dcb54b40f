//! Atención a Clientes Frontend App
//!
//! Opens the session, fills the home lists and hosts the filter screens.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use atencion_core::{AdvancedFilter, ApiResult, BasicFilter, LookupBundle};

use crate::commands;
use crate::components::{AdvancedFilterModal, HomeFilter};
use crate::context::AppContext;
use crate::store::{self, AppState};

async fn load_home() -> ApiResult<LookupBundle> {
    commands::init_session().await?;
    commands::load_initial_lookups().await
}

#[component]
pub fn App() -> impl IntoView {
    let app_store = Store::new(AppState::default());
    provide_context(app_store);

    let filter = RwSignal::new(BasicFilter::new());
    let show_advanced = signal(false);
    let applied_advanced = signal::<Option<AdvancedFilter>>(None);
    let ctx = AppContext::new(filter, show_advanced, applied_advanced);
    provide_context(ctx);

    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Authenticate if needed, then load the home lists
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("Cargando parámetros iniciales, intento {}", trigger);
        spawn_local(async move {
            match load_home().await {
                Ok(bundle) => {
                    log::info!("Parámetros cargados: {} listas", bundle.len());
                    store::store_apply_initial(&app_store, bundle);
                }
                Err(e) => {
                    log::error!("Error al cargar parámetros: {}", e);
                    store::store_set_error(&app_store, e.to_string());
                }
            }
        });
    });

    let load_error = store::load_error(app_store);
    let applied_json = move || {
        ctx.applied_advanced.with(|applied| {
            applied
                .as_ref()
                .and_then(|filter| serde_json::to_string_pretty(filter).ok())
        })
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Atención a clientes"</h1>
                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| {
                        commands::logout();
                        set_reload_trigger.update(|n| *n += 1);
                    }
                >
                    "Renovar sesión"
                </button>
            </header>

            {move || {
                load_error
                    .get()
                    .map(|message| {
                        view! {
                            <div class="load-error">
                                <span>{message}</span>
                                <button
                                    type="button"
                                    class="btn-link"
                                    on:click=move |_| set_reload_trigger.update(|n| *n += 1)
                                >
                                    "Reintentar"
                                </button>
                            </div>
                        }
                    })
            }}

            <main class="main-content">
                <HomeFilter />

                {move || {
                    applied_json()
                        .map(|json| {
                            view! {
                                <section class="applied-filter">
                                    <div class="applied-filter-header">
                                        <h2>"Filtro avanzado aplicado"</h2>
                                        <button
                                            type="button"
                                            class="btn-link"
                                            on:click=move |_| ctx.clear_advanced()
                                        >
                                            "Quitar"
                                        </button>
                                    </div>
                                    <pre>{json}</pre>
                                </section>
                            }
                        })
                }}
            </main>

            <Show when=move || ctx.show_advanced.get()>
                <AdvancedFilterModal />
            </Show>
        </div>
    }
}
