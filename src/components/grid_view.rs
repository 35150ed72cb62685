//! Grid View Component
//!
//! Every position as a card, in pre-order, regardless of expansion.

use leptos::prelude::*;

use crate::actions::use_shell;
use crate::context::use_app_context;
use crate::org_chart::OrgChartState;
use crate::tree::flatten;

#[component]
pub fn GridView(state: OrgChartState) -> impl IntoView {
    let ctx = use_app_context();
    let shell = use_shell();
    let rows = state.root.with_value(flatten);

    view! {
        <div class="grid-view">
            {rows
                .into_iter()
                .map(|row| {
                    let id = StoredValue::new(row.id.clone());
                    let titles = row.titles.clone();
                    let is_focused = move || id.with_value(|id| state.focused.with(|f| f.as_deref() == Some(id.as_str())));
                    view! {
                        <button
                            class=move || if is_focused() { "grid-card focused" } else { "grid-card" }
                            on:click=move |_| id.with_value(|id| {
                                state.focus(id);
                                shell.modals.update(|m| m.show_detail(id));
                            })
                        >
                            <span class="grid-level">{format!("L{}", row.level)}</span>
                            <span class="node-title">{move || titles.get(ctx.language.get()).to_string()}</span>
                            {row.holder.map(|holder| view! { <span class="node-holder">{holder}</span> })}
                            {row.department.map(|dept| view! { <span class="node-department">{dept}</span> })}
                            {(row.child_count > 0).then(|| view! {
                                <span class="node-reports">{format!("{} direct reports", row.child_count)}</span>
                            })}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
