//! Chart Toolbar Component
//!
//! View toggle with transition progress, zoom controls, expand/collapse,
//! language and fullscreen.

use leptos::prelude::*;

use crate::actions::{use_dispatcher, use_shell, AppAction};
use crate::context::use_app_context;
use crate::org_chart::OrgChartState;

#[component]
pub fn ChartToolbar(state: OrgChartState) -> impl IntoView {
    let ctx = use_app_context();
    let shell = use_shell();
    let dispatcher = use_dispatcher();
    let run = move |action: AppAction| dispatcher.run(action);

    view! {
        <div class="chart-toolbar">
            <div class="toolbar-group">
                <button
                    class="btn"
                    title="Toggle tree / grid (T)"
                    disabled=move || state.is_transitioning()
                    on:click=move |_| run(AppAction::ToggleView)
                >
                    {move || format!("{} view", state.view_mode.get().toggled().label())}
                </button>
                {move || state.transition.get().map(|percent| view! {
                    <div class="transition-progress" role="progressbar" aria-valuenow=percent.to_string()>
                        <div class="transition-progress-bar" style=format!("width: {}%;", percent)></div>
                    </div>
                })}
            </div>

            <div class="toolbar-group">
                <button
                    class="btn btn-small"
                    title="Zoom out (-)"
                    disabled=move || !state.zoom.get().can_zoom_out()
                    on:click=move |_| run(AppAction::ZoomOut)
                >"−"</button>
                <button class="btn btn-small zoom-level" title="Reset zoom (0)" on:click=move |_| run(AppAction::ResetZoom)>
                    {move || format!("{}%", state.zoom.get().percent())}
                </button>
                <button
                    class="btn btn-small"
                    title="Zoom in (+)"
                    disabled=move || !state.zoom.get().can_zoom_in()
                    on:click=move |_| run(AppAction::ZoomIn)
                >"+"</button>
            </div>

            <div class="toolbar-group">
                <button class="btn btn-small" title="Expand all (E)" on:click=move |_| run(AppAction::ExpandAll)>"Expand all"</button>
                <button class="btn btn-small" title="Collapse all (C)" on:click=move |_| run(AppAction::CollapseAll)>"Collapse all"</button>
            </div>

            <div class="toolbar-group">
                <button class="btn btn-small" title="Switch language (L)" on:click=move |_| run(AppAction::ToggleLanguage)>
                    {move || ctx.language.get().toggled().code()}
                </button>
                <button class="btn btn-small" title="Fullscreen (F)" on:click=move |_| run(AppAction::ToggleFullscreen)>
                    {move || if shell.fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }}
                </button>
                <button class="btn btn-small" title="Keyboard shortcuts (?)" on:click=move |_| run(AppAction::ShowShortcuts)>"?"</button>
            </div>
        </div>
    }
}
