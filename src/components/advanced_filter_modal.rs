//! Advanced Filter Modal
//!
//! Edits a copy of the applied advanced filter. Lists are loaded once per
//! opening; accepting hands the copy back to the app context.

use leptos::prelude::*;
use leptos::task::spawn_local;

use atencion_core::{
    list, ClassificationSelection, DateMode, FeederSelection, LookupBundle, LookupItem,
    MissingDate, TreeKind,
};

use super::{ClassificationModal, DistrictSelect, FeederModal, LookupSelect};
use crate::commands;
use crate::context::use_app_context;

#[component]
pub fn AdvancedFilterModal() -> impl IntoView {
    let ctx = use_app_context();
    let filter = RwSignal::new(ctx.applied_advanced.get_untracked().unwrap_or_default());
    let lists = RwSignal::new(LookupBundle::new());
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let (drill_down, set_drill_down) = signal::<Option<TreeKind>>(None);

    spawn_local(async move {
        match commands::load_advanced_lookups().await {
            Ok(bundle) => {
                log::info!("Parámetros del filtro avanzado cargados: {} listas", bundle.len());
                lists.try_set(bundle);
            }
            Err(e) => {
                log::error!("Error al cargar parámetros del filtro avanzado: {}", e);
                set_load_error.try_set(Some(e.to_string()));
            }
        }
    });

    let items = move |name: &'static str| -> Signal<Vec<LookupItem>> {
        Signal::derive(move || lists.with(|b| b.get(name).to_vec()))
    };

    let date_mode = move || filter.with(|f| f.date_mode());
    let missing = move || filter.with(|f| f.missing_dates());
    let date_error = move || filter.with(|f| f.date_error().map(|e| e.to_string()));

    let property_summary = move || {
        filter.with(|f| {
            f.property_selection().map(|s| {
                format!(
                    "{} clasificaciones, {} tipos, {} subtipos",
                    s.classifications.len(),
                    s.types.len(),
                    s.subtypes.len()
                )
            })
        })
    };
    let electric_summary = move || {
        filter.with(|f| {
            f.electric_selection()
                .map(|s| format!("{} SET, {} alimentadores", s.sets.len(), s.feeders.len()))
        })
    };

    let date_input = move |label: &'static str, which: MissingDate| {
        let value = move || {
            filter.with(|f| match which {
                MissingDate::From => f.date_from().to_string(),
                MissingDate::To => f.date_to().to_string(),
            })
        };
        view! {
            <label class="field">
                <span class="field-label">{label}</span>
                <input
                    type="date"
                    class="field-input"
                    class:invalid=move || missing().contains(&which)
                    prop:value=value
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        filter.update(|f| match which {
                            MissingDate::From => f.set_date_from(&value),
                            MissingDate::To => f.set_date_to(&value),
                        });
                    }
                />
            </label>
        }
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal advanced-filter-modal">
                <header class="modal-header">
                    <h2>"Filtro avanzado"</h2>
                </header>

                <div class="modal-body">
                    {move || load_error.get().map(|message| view! { <p class="load-error">{message}</p> })}

                    // Datos de llamada
                    <fieldset class="filter-section">
                        <legend>"Datos de llamada"</legend>
                        <div class="filter-grid">
                            <LookupSelect
                                label="Tipo ID"
                                items=items(list::TIPO_ID_LLAMADA)
                                value=Signal::derive(move || filter.with(|f| f.id_type.clone()))
                                on_change=move |value: String| filter.update(|f| f.id_type = value)
                            />
                            <LookupSelect
                                label="Descripción"
                                items=items(list::DESCRIPCIONES)
                                value=Signal::derive(move || filter.with(|f| f.description.clone()))
                                on_change=move |value: String| filter.update(|f| f.description = value)
                            />
                            <div class="field">
                                <span class="field-label">"Distrito"</span>
                                <DistrictSelect
                                    filter=filter
                                    items=items(list::DISTRITOS)
                                />
                            </div>
                            <LookupSelect
                                label="Zona"
                                items=items(list::ZONA_LLAMADA)
                                value=Signal::derive(move || filter.with(|f| f.zone.clone()))
                                on_change=move |value: String| filter.update(|f| f.zone = value)
                            />
                            <LookupSelect
                                label="Tipo origen"
                                items=items(list::TIPO_ORIGEN_LLAMADA)
                                value=Signal::derive(move || filter.with(|f| f.origin_type.clone()))
                                on_change=move |value: String| filter.update(|f| f.origin_type = value)
                            />
                            <LookupSelect
                                label="Sucursal"
                                items=items(list::SUCURSALES)
                                value=Signal::derive(move || filter.with(|f| f.branch.clone()))
                                on_change=move |value: String| filter.update(|f| f.branch = value)
                            />
                            <LookupSelect
                                label="Centro de servicio"
                                items=items(list::CENTRO_DE_SERVICIO)
                                value=Signal::derive(move || filter.with(|f| f.service_center.clone()))
                                on_change=move |value: String| filter.update(|f| f.service_center = value)
                            />
                            <label class="field">
                                <span class="field-label">"Fecha llamada"</span>
                                <select
                                    class="field-input"
                                    prop:value=move || date_mode().as_str()
                                    on:change=move |ev| {
                                        let mode = DateMode::parse(&event_target_value(&ev));
                                        filter.update(|f| f.set_date_mode(mode));
                                    }
                                >
                                    {DateMode::ALL
                                        .into_iter()
                                        .map(|mode| {
                                            view! {
                                                <option
                                                    value=mode.as_str()
                                                    selected=move || date_mode() == mode
                                                >
                                                    {mode.label()}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                            <Show when=move || filter.with(|f| f.shows_single_date())>
                                {date_input("Fecha", MissingDate::From)}
                            </Show>
                            <Show when=move || filter.with(|f| f.shows_between_dates())>
                                {date_input("Fecha inicio", MissingDate::From)}
                                {date_input("Fecha fin", MissingDate::To)}
                            </Show>
                            <Show when=move || filter.with(|f| f.shows_until_date())>
                                {date_input("Fecha", MissingDate::To)}
                            </Show>
                        </div>
                        {move || date_error().map(|message| view! { <p class="field-error">{message}</p> })}
                    </fieldset>

                    // Datos del predio
                    <fieldset class="filter-section">
                        <legend>"Datos del predio"</legend>
                        <label class="field-checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || filter.with(|f| f.custom_property())
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    filter.update(|f| f.set_custom_property(checked));
                                }
                            />
                            <span>"Filtro personalizado"</span>
                        </label>
                        <Show when=move || filter.with(|f| f.custom_property())>
                            <div class="custom-filter-row">
                                <button
                                    type="button"
                                    class="btn-link"
                                    on:click=move |_| set_drill_down.set(Some(TreeKind::Classification))
                                >
                                    "Seleccionar clasificaciones"
                                </button>
                                {move || property_summary().map(|text| view! { <span class="selection-summary">{text}</span> })}
                            </div>
                        </Show>
                        <div class="filter-grid">
                            <LookupSelect
                                label="Clasificación"
                                items=items(list::CLASIFICACIONES)
                                value=Signal::derive(move || filter.with(|f| f.classification().to_string()))
                                on_change=move |value: String| filter.update(|f| f.set_classification(&value))
                                disabled=Signal::derive(move || filter.with(|f| f.custom_property()))
                            />
                            <LookupSelect
                                label="Tipo pedido"
                                items=items(list::TIPOS)
                                value=Signal::derive(move || filter.with(|f| f.order_type().to_string()))
                                on_change=move |value: String| filter.update(|f| f.set_order_type(&value))
                                disabled=Signal::derive(move || filter.with(|f| f.custom_property()))
                            />
                            <LookupSelect
                                label="Sub tipo pedido"
                                items=items(list::SUBTIPOS)
                                value=Signal::derive(move || filter.with(|f| f.order_subtype().to_string()))
                                on_change=move |value: String| filter.update(|f| f.set_order_subtype(&value))
                                disabled=Signal::derive(move || filter.with(|f| f.custom_property()))
                            />
                            <LookupSelect
                                label="Estado"
                                items=items(list::ESTADOS)
                                value=Signal::derive(move || filter.with(|f| f.status.clone()))
                                on_change=move |value: String| filter.update(|f| f.status = value)
                            />
                        </div>
                    </fieldset>

                    // Datos eléctricos
                    <fieldset class="filter-section">
                        <legend>"Datos eléctricos"</legend>
                        <label class="field-checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || filter.with(|f| f.custom_electric())
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    filter.update(|f| f.set_custom_electric(checked));
                                }
                            />
                            <span>"Filtro personalizado"</span>
                        </label>
                        <Show when=move || filter.with(|f| f.custom_electric())>
                            <div class="custom-filter-row">
                                <button
                                    type="button"
                                    class="btn-link"
                                    on:click=move |_| set_drill_down.set(Some(TreeKind::Electrical))
                                >
                                    "Seleccionar SET y alimentadores"
                                </button>
                                {move || electric_summary().map(|text| view! { <span class="selection-summary">{text}</span> })}
                            </div>
                        </Show>
                        <div class="filter-grid">
                            <LookupSelect
                                label="SET"
                                items=items(list::SETS)
                                value=Signal::derive(move || filter.with(|f| f.set_code().to_string()))
                                on_change=move |value: String| filter.update(|f| f.set_set(&value))
                                disabled=Signal::derive(move || filter.with(|f| f.custom_electric()))
                            />
                            <LookupSelect
                                label="Alimentador"
                                items=items(list::ALIMENTACIONES)
                                value=Signal::derive(move || filter.with(|f| f.feeder().to_string()))
                                on_change=move |value: String| filter.update(|f| f.set_feeder(&value))
                                disabled=Signal::derive(move || filter.with(|f| f.custom_electric()))
                            />
                        </div>
                    </fieldset>
                </div>

                <footer class="modal-footer">
                    <Show when=move || !missing().is_empty()>
                        <span class="field-error">"Complete las fechas requeridas"</span>
                    </Show>
                    <button type="button" class="btn-secondary" on:click=move |_| ctx.close_advanced()>
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        class="btn-primary"
                        disabled=move || !filter.with(|f| f.is_submittable())
                        on:click=move |_| ctx.apply_advanced(filter.get_untracked())
                    >
                        "Aceptar"
                    </button>
                </footer>
            </div>

            {move || {
                drill_down
                    .get()
                    .map(|kind| match kind {
                        TreeKind::Classification => {
                            view! {
                                <ClassificationModal
                                    on_accept=move |selection: ClassificationSelection| {
                                        filter.update(|f| f.set_property_selection(selection));
                                        set_drill_down.set(None);
                                    }
                                    on_cancel=Callback::new(move |_: ()| set_drill_down.set(None))
                                />
                            }
                                .into_any()
                        }
                        TreeKind::Electrical => {
                            view! {
                                <FeederModal
                                    on_accept=move |selection: FeederSelection| {
                                        filter.update(|f| f.set_electric_selection(selection));
                                        set_drill_down.set(None);
                                    }
                                    on_cancel=Callback::new(move |_: ()| set_drill_down.set(None))
                                />
                            }
                                .into_any()
                        }
                    })
            }}
        </div>
    }
}
