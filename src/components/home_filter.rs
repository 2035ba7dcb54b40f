//! Home Filter Component
//!
//! Basic search form shown on the landing screen.

use leptos::prelude::*;

use super::{DistrictSelect, LookupSelect};
use crate::context::use_app_context;
use crate::store::{self, use_app_store};

#[component]
pub fn HomeFilter() -> impl IntoView {
    let ctx = use_app_context();
    let app_store = use_app_store();
    let filter = ctx.filter;

    let date_error = move || filter.with(|f| f.date_error().map(|e| e.to_string()));

    view! {
        <section class="filter-panel">
            <div class="filter-grid">
                <label class="field">
                    <span class="field-label">"Código llamada"</span>
                    <input
                        type="text"
                        class="field-input"
                        prop:value=move || filter.with(|f| f.call_code.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.call_code = value);
                        }
                    />
                </label>

                <LookupSelect
                    label="Tipo ID"
                    items=store::tipos_id_llamada(app_store)
                    value=Signal::derive(move || filter.with(|f| f.id_type().to_string()))
                    on_change=move |value: String| filter.update(|f| f.set_id_type(&value))
                />

                <label class="field">
                    <span class="field-label">"Código"</span>
                    <input
                        type="text"
                        class="field-input"
                        disabled=move || filter.with(|f| f.code_disabled())
                        prop:value=move || filter.with(|f| f.code().to_string())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.set_code(&value));
                        }
                    />
                </label>

                <div class="field">
                    <span class="field-label">"Distrito"</span>
                    <DistrictSelect
                        filter=filter
                        items=store::distritos(app_store)
                    />
                </div>

                <LookupSelect
                    label="SAE"
                    items=store::sucursales(app_store)
                    value=Signal::derive(move || filter.with(|f| f.branch.clone()))
                    on_change=move |value: String| filter.update(|f| f.branch = value)
                />

                <label class="field">
                    <span class="field-label">"Incidencia"</span>
                    <input
                        type="text"
                        class="field-input"
                        prop:value=move || filter.with(|f| f.incident.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.incident = value);
                        }
                    />
                </label>

                <label class="field">
                    <span class="field-label">"Usuario"</span>
                    <input
                        type="text"
                        class="field-input"
                        prop:value=move || filter.with(|f| f.user.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.user = value);
                        }
                    />
                </label>

                <label class="field">
                    <span class="field-label">"Fecha desde"</span>
                    <input
                        type="datetime-local"
                        class="field-input"
                        prop:value=move || filter.with(|f| f.date_from().to_string())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.set_date_from(&value));
                        }
                    />
                </label>

                <label class="field">
                    <span class="field-label">"Fecha hasta"</span>
                    <input
                        type="datetime-local"
                        class="field-input"
                        prop:value=move || filter.with(|f| f.date_to().to_string())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            filter.update(|f| f.set_date_to(&value));
                        }
                    />
                </label>
            </div>

            {move || date_error().map(|message| view! { <p class="field-error">{message}</p> })}

            <div class="filter-actions">
                <button type="button" class="btn-secondary" on:click=move |_| filter.update(|f| f.reset())>
                    "Limpiar"
                </button>
                <button type="button" class="btn-primary" on:click=move |_| ctx.open_advanced()>
                    "Filtro avanzado"
                </button>
            </div>
        </section>
    }
}
