//! Drill-Down Modals
//!
//! Lazily loaded selection trees: clasificación → tipo → subtipo and
//! SET → alimentador. Children are fetched the first time a row opens.

use leptos::prelude::*;
use leptos::task::spawn_local;

use atencion_core::{ClassificationSelection, FeederSelection, NodeId, SelectionTree, TreeKind};

use crate::commands;
use crate::config;

/// Shared tree modal; `on_accept` receives the final tree
#[component]
fn DrillDownModal(
    kind: TreeKind,
    #[prop(into)] title: String,
    #[prop(into)] on_accept: Callback<SelectionTree>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let tree = RwSignal::new(SelectionTree::new(kind, config::api_config().fallback));

    let load_roots = move || {
        let request = tree.with_untracked(|t| t.root_request());
        spawn_local(async move {
            let result = commands::load_lookups(request).await;
            if let Err(e) = &result {
                log::error!("Error al cargar {}: {}", kind.levels()[0], e);
            }
            tree.try_update(|t| t.resolve_roots(result));
        });
    };
    load_roots();

    let selection_count = move || tree.with(|t| t.selection_count());

    view! {
        <div class="modal-backdrop nested">
            <div class="modal drill-down-modal">
                <header class="modal-header">
                    <h2>{title}</h2>
                </header>

                <div class="modal-body tree-list">
                    <Show when=move || tree.with(|t| t.roots_failed())>
                        <div class="tree-error">
                            <span>"No se pudo cargar la lista"</span>
                            <button type="button" class="btn-link" on:click=move |_| load_roots()>
                                "Reintentar"
                            </button>
                        </div>
                    </Show>
                    <For
                        each=move || tree.with(|t| t.visible_rows())
                        key=|(id, _)| *id
                        children=move |(id, depth)| view! { <TreeRow tree=tree id=id depth=depth /> }
                    />
                </div>

                <footer class="modal-footer">
                    <span class="selection-count">
                        {move || format!("{} seleccionados", selection_count())}
                    </span>
                    <button
                        type="button"
                        class="btn-secondary"
                        on:click=move |_| tree.update(|t| t.clear_selection())
                    >
                        "Limpiar"
                    </button>
                    <button type="button" class="btn-secondary" on:click=move |_| on_cancel.run(())>
                        "Cancelar"
                    </button>
                    <button
                        type="button"
                        class="btn-primary"
                        on:click=move |_| on_accept.run(tree.get_untracked())
                    >
                        "Aceptar"
                    </button>
                </footer>
            </div>
        </div>
    }
}

/// One node with its expander and checkbox
#[component]
fn TreeRow(tree: RwSignal<SelectionTree>, id: NodeId, depth: usize) -> impl IntoView {
    let label = tree.with_untracked(|t| t.node(id).map(|n| n.item.label.clone()).unwrap_or_default());
    let expandable = tree.with_untracked(|t| t.is_expandable(id));
    let expanded = move || tree.with(|t| t.node(id).is_some_and(|n| n.expanded));
    let loading = move || tree.with(|t| t.is_loading(id));
    let failed = move || tree.with(|t| t.load_failed(id));

    let on_expand = move |_: web_sys::MouseEvent| {
        let Some(fetch) = tree.try_update(|t| t.toggle_expand(id)).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = commands::load_lookups(fetch.request).await;
            if let Err(e) = &result {
                log::warn!("Error al cargar {}: {}", fetch.list, e);
            }
            tree.try_update(|t| t.resolve_children(fetch.node, result));
        });
    };

    view! {
        <div class="tree-row" style=format!("padding-left: {}px", depth * 24)>
            {if expandable {
                view! {
                    <button type="button" class="tree-expander" on:click=on_expand>
                        {move || if expanded() { "▾" } else { "▸" }}
                    </button>
                }
                    .into_any()
            } else {
                view! { <span class="tree-expander-placeholder"></span> }.into_any()
            }}
            <label class="tree-label">
                <input
                    type="checkbox"
                    prop:checked=move || tree.with(|t| t.is_selected(id))
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        tree.update(|t| t.toggle_select(id, checked));
                    }
                />
                <span>{label}</span>
            </label>
            <Show when=loading>
                <span class="tree-status">"Cargando..."</span>
            </Show>
            <Show when=move || failed() && expanded()>
                <span class="tree-status error">"Error al cargar"</span>
            </Show>
        </div>
    }
}

/// Clasificación → tipo → subtipo picker
#[component]
pub fn ClassificationModal(
    #[prop(into)] on_accept: Callback<ClassificationSelection>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DrillDownModal
            kind=TreeKind::Classification
            title="Filtro personalizado: clasificaciones"
            on_accept=move |tree: SelectionTree| on_accept.run(ClassificationSelection::from(&tree))
            on_cancel=on_cancel
        />
    }
}

/// SET → alimentador picker
#[component]
pub fn FeederModal(
    #[prop(into)] on_accept: Callback<FeederSelection>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <DrillDownModal
            kind=TreeKind::Electrical
            title="Filtro personalizado: SET y alimentadores"
            on_accept=move |tree: SelectionTree| on_accept.run(FeederSelection::from(&tree))
            on_cancel=on_cancel
        />
    }
}
