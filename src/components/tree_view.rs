//! Tree View Component
//!
//! Expansion-gated org chart tree. Rows come from a pre-order walk that
//! stops at collapsed nodes; each row is indented by its depth.

use leptos::prelude::*;

use crate::actions::use_shell;
use crate::context::use_app_context;
use crate::org_chart::OrgChartState;
use crate::tree::GridRow;

/// A single position row in the tree
#[component]
fn TreeNodeRow(row: GridRow, state: OrgChartState) -> impl IntoView {
    let ctx = use_app_context();
    let shell = use_shell();

    let id = StoredValue::new(row.id.clone());
    let has_children = row.child_count > 0;
    let indent = row.depth * 24;
    let is_expanded = move || id.with_value(|id| state.expanded.with(|set| set.is_expanded(id)));
    let is_focused = move || id.with_value(|id| state.focused.with(|f| f.as_deref() == Some(id.as_str())));
    let titles = row.titles.clone();

    view! {
        <div
            class=move || if is_focused() { "tree-node focused" } else { "tree-node" }
            style=format!("margin-left: {}px;", indent)
        >
            // Collapse toggle
            {if has_children {
                view! {
                    <button
                        class="collapse-btn"
                        aria-expanded=move || is_expanded().to_string()
                        on:click=move |_| id.with_value(|id| state.toggle_node(id))
                    >
                        {move || if is_expanded() { "▼" } else { "▶" }}
                    </button>
                }.into_any()
            } else {
                view! { <span class="collapse-placeholder">"·"</span> }.into_any()
            }}

            <button
                class="node-card"
                on:click=move |_| id.with_value(|id| {
                    state.focus(id);
                    shell.modals.update(|m| m.show_detail(id));
                })
            >
                <span class="node-title">{move || titles.get(ctx.language.get()).to_string()}</span>
                {row.holder.clone().map(|holder| view! { <span class="node-holder">{holder}</span> })}
                {row.department.clone().map(|dept| view! { <span class="node-department">{dept}</span> })}
            </button>

            {has_children.then(|| view! {
                <span class="node-reports" title="Direct reports">{row.child_count}</span>
            })}
        </div>
    }
}

#[component]
pub fn TreeView(state: OrgChartState) -> impl IntoView {
    view! {
        <div class="tree-view">
            <For
                each=move || state.visible_rows()
                key=|row| (row.id.clone(), row.depth)
                children=move |row| view! { <TreeNodeRow row=row state=state /> }
            />
        </div>
    }
}
