//! Org Chart Page Component
//!
//! Toolbar, breadcrumb and the tree or grid rendering of the hierarchy.
//! Registers its controller with the shell so shortcuts and the palette
//! can reach it while mounted.

use leptos::prelude::*;

use crate::actions::use_shell;
use crate::components::{BreadcrumbBar, ChartToolbar, GridView, NodeDetail, TreeView};
use crate::org_chart::{use_hierarchy, OrgChartState};
use crate::view_state::ViewMode;

#[component]
pub fn OrgChartPage() -> impl IntoView {
    let shell = use_shell();
    let Some(root) = use_hierarchy().root() else {
        return view! {
            <section class="org-chart-page">
                <p class="notice notice-error">"Organization chart data is unavailable."</p>
            </section>
        }
        .into_any();
    };

    let state = OrgChartState::new(root);
    shell.chart.set(Some(state));
    on_cleanup(move || {
        shell.chart.try_set(None);
    });

    // Focus requested from the palette before the page was open
    if let Some(id) = shell.pending_focus.get_untracked() {
        shell.pending_focus.set(None);
        state.focus(&id);
    }

    let zoom_style = move || {
        let factor = state.zoom.get().factor();
        format!("transform: scale({}); transform-origin: top left;", factor)
    };

    view! {
        <section class="org-chart-page">
            <ChartToolbar state=state />
            <BreadcrumbBar state=state />
            <div class=move || if state.is_transitioning() { "chart-canvas transitioning" } else { "chart-canvas" }>
                <div class="chart-zoom" style=zoom_style>
                    {move || match state.view_mode.get() {
                        ViewMode::Tree => view! { <TreeView state=state /> }.into_any(),
                        ViewMode::Grid => view! { <GridView state=state /> }.into_any(),
                    }}
                </div>
            </div>
            <NodeDetail state=state />
        </section>
    }
    .into_any()
}
