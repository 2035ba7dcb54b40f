//! Lookup Select Component
//!
//! Single-choice `<select>` over a parameter list.

use leptos::prelude::*;

use atencion_core::{LookupItem, PLACEHOLDER};

/// Labeled select whose first option is the blank placeholder
///
/// Props:
/// - items: options, usually a store or bundle slice
/// - value: selected code, blank for none
/// - on_change: receives the new code
#[component]
pub fn LookupSelect(
    #[prop(into)] label: String,
    #[prop(into)] items: Signal<Vec<LookupItem>>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <select
                class="field-input"
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value="">{PLACEHOLDER}</option>
                <For
                    each=move || items.get()
                    key=|item| item.code.clone()
                    children=move |item| {
                        let code = item.code.clone();
                        let is_selected = move || value.get() == code;
                        view! {
                            <option value=item.code.clone() selected=is_selected>
                                {item.label}
                            </option>
                        }
                    }
                />
            </select>
        </label>
    }
}
