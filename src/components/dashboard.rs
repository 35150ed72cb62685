//! Dashboard Component
//!
//! Record counts per resource and org chart statistics.

use leptos::prelude::*;

use crate::actions::{use_dispatcher, AppAction};
use crate::org_chart::use_hierarchy;
use crate::routes::Route;
use crate::store::{store_counts, use_app_store};
use crate::tree::{level_gaps, max_depth, node_count};

const COUNT_ROUTES: [Route; 5] = [
    Route::Ministries,
    Route::Departments,
    Route::Positions,
    Route::Attributes,
    Route::Users,
];

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_app_store();
    let hierarchy = use_hierarchy();
    let dispatcher = use_dispatcher();

    // (nodes, depth, level gaps)
    let stats = hierarchy.with(|root| root.map(|root| (node_count(root), max_depth(root), level_gaps(root).len())));

    view! {
        <section class="dashboard">
            <h1>"Dashboard"</h1>
            <div class="stat-cards">
                {move || {
                    store_counts(&store)
                        .into_iter()
                        .zip(COUNT_ROUTES)
                        .map(|((label, count), route)| view! {
                            <button class="stat-card" on:click=move |_| dispatcher.run(AppAction::Navigate(route))>
                                <span class="stat-value">{count}</span>
                                <span class="stat-label">{label}</span>
                            </button>
                        })
                        .collect_view()
                }}
            </div>

            <h2>"Organization chart"</h2>
            {match stats {
                Some((nodes, depth, gaps)) => view! {
                    <div class="stat-cards">
                        <div class="stat-card">
                            <span class="stat-value">{nodes}</span>
                            <span class="stat-label">"Positions in chart"</span>
                        </div>
                        <div class="stat-card">
                            <span class="stat-value">{depth + 1}</span>
                            <span class="stat-label">"Levels"</span>
                        </div>
                        {(gaps > 0).then(|| view! {
                            <div class="stat-card warning">
                                <span class="stat-value">{gaps}</span>
                                <span class="stat-label">"Level gaps"</span>
                            </div>
                        })}
                    </div>
                    <button class="btn btn-primary" on:click=move |_| dispatcher.run(AppAction::Navigate(Route::OrganizationChart))>
                        "Open organization chart"
                    </button>
                }
                .into_any(),
                None => view! { <p class="notice notice-error">"Organization chart data is unavailable."</p> }.into_any(),
            }}
        </section>
    }
}
