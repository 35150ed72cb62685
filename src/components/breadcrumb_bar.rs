//! Breadcrumb Bar Component
//!
//! Root-to-node path of the focused position. Clicking an item focuses it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::org_chart::OrgChartState;

#[component]
pub fn BreadcrumbBar(state: OrgChartState) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="breadcrumb-bar" aria-label="Breadcrumb">
            {move || {
                let lang = ctx.language.get();
                let items = state.breadcrumb();
                let last = items.len().saturating_sub(1);
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let id = item.id.clone();
                        let title = item.titles.get(lang).to_string();
                        view! {
                            {(i > 0).then(|| view! { <span class="breadcrumb-sep">"›"</span> })}
                            <button
                                class=if i == last { "breadcrumb-item current" } else { "breadcrumb-item" }
                                title=format!("Level {}", item.level)
                                on:click=move |_| {
                                    state.focus(&id);
                                }
                            >
                                {title}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}
