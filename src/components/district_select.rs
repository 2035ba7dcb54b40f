//! District Multi-Select Component
//!
//! Dropdown with a search box and one checkbox per district. Clicking
//! anywhere outside the component closes the panel.

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use atencion_core::LookupItem;

use crate::models::HasDistricts;

/// District picker bound to the `districts` field of a filter
#[component]
pub fn DistrictSelect<T>(
    filter: RwSignal<T>,
    #[prop(into)] items: Signal<Vec<LookupItem>>,
) -> impl IntoView
where
    T: HasDistricts + Send + Sync + 'static,
{
    let container = NodeRef::<html::Div>::new();

    let handle = window_event_listener(ev::click, move |ev| {
        let Some(root) = container.get_untracked() else {
            return;
        };
        let inside = ev
            .target()
            .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
            .map(|node| root.contains(Some(&node)))
            .unwrap_or(false);
        let open = filter
            .try_with_untracked(|f| f.districts().is_open())
            .unwrap_or(false);
        if open && !inside {
            filter.try_update(|f| f.districts_mut().close());
        }
    });
    on_cleanup(move || handle.remove());

    let label = move || {
        filter.with(|f| items.with(|all| f.district_label(all)))
    };

    let candidates = move || -> Vec<LookupItem> {
        filter.with(|f| {
            items.with(|all| f.districts().candidates(all).into_iter().cloned().collect())
        })
    };

    view! {
        <div class="multi-select" node_ref=container>
            <button
                type="button"
                class="multi-select-toggle"
                on:click=move |_| filter.update(|f| f.districts_mut().toggle_open())
            >
                {label}
            </button>
            <Show when=move || filter.with(|f| f.districts().is_open())>
                <div class="multi-select-panel">
                    <input
                        type="text"
                        class="multi-select-search"
                        placeholder="Buscar distrito..."
                        autocomplete="off"
                        prop:value=move || filter.with(|f| f.districts().query().to_string())
                        on:input=move |ev| {
                            let query = event_target_value(&ev);
                            filter.update(|f| f.districts_mut().set_query(&query));
                        }
                    />
                    <div class="multi-select-options">
                        {move || {
                            candidates()
                                .into_iter()
                                .map(|item| {
                                    let code = item.code.clone();
                                    let code_for_change = item.code.clone();
                                    view! {
                                        <label class="multi-select-option">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || {
                                                    filter.with(|f| f.districts().is_selected(&code))
                                                }
                                                on:change=move |ev| {
                                                    let checked = event_target_checked(&ev);
                                                    filter.update(|f| {
                                                        f.districts_mut().set_checked(&code_for_change, checked)
                                                    });
                                                }
                                            />
                                            <span>{item.label}</span>
                                        </label>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </Show>
        </div>
    }
}
