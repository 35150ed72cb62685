//! App Actions
//!
//! Everything the command palette and keyboard shortcuts can trigger, and
//! the dispatcher that routes an action to the right piece of state.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, ApiClient};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::org_chart::OrgChartState;
use crate::routes::{Route, Router};
use crate::session::SessionContext;
use crate::view_state::ModalState;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Navigate(Route),
    OpenPalette,
    CloseOverlays,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    ToggleView,
    ExpandAll,
    CollapseAll,
    ToggleFullscreen,
    ToggleLanguage,
    ShowShortcuts,
    Logout,
    /// Focus a position node in the org chart
    FocusNode(String),
}

impl AppAction {
    /// Actions that operate on the mounted org chart
    pub fn targets_chart(&self) -> bool {
        matches!(
            self,
            Self::ZoomIn
                | Self::ZoomOut
                | Self::ResetZoom
                | Self::ToggleView
                | Self::ExpandAll
                | Self::CollapseAll
                | Self::FocusNode(_)
        )
    }
}

/// Shell-level overlay state provided via context
#[derive(Clone, Copy)]
pub struct Shell {
    pub modals: RwSignal<ModalState>,
    pub fullscreen: RwSignal<bool>,
    /// Org chart controller while the chart page is mounted
    pub chart: RwSignal<Option<OrgChartState>>,
    /// Node to focus once the chart page mounts
    pub pending_focus: RwSignal<Option<String>>,
}

impl Shell {
    pub fn new() -> Self {
        let fullscreen = RwSignal::new(false);

        let on_change = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            let active = document().fullscreen_element().is_some();
            fullscreen.set(active);
        });
        let _ = document().add_event_listener_with_callback("fullscreenchange", on_change.as_ref().unchecked_ref());
        on_change.forget();

        Self {
            modals: RwSignal::new(ModalState::default()),
            fullscreen,
            chart: RwSignal::new(None),
            pending_focus: RwSignal::new(None),
        }
    }
}

pub fn use_shell() -> Shell {
    expect_context::<Shell>()
}

fn toggle_fullscreen() {
    let doc = document();
    if doc.fullscreen_element().is_some() {
        doc.exit_fullscreen();
        return;
    }
    if let Some(el) = doc.document_element() {
        if let Err(e) = el.request_fullscreen() {
            web_sys::console::error_1(&format!("[APP] fullscreen request rejected: {:?}", e).into());
        }
    }
}

/// Runs actions against the captured contexts; safe to call from event handlers
#[derive(Clone, Copy)]
pub struct Dispatcher {
    shell: Shell,
    router: Router,
    session: SessionContext,
    app: AppContext,
    config: StoredValue<AppConfig>,
}

impl Dispatcher {
    pub fn new(shell: Shell, router: Router, session: SessionContext, app: AppContext, config: AppConfig) -> Self {
        Self {
            shell,
            router,
            session,
            app,
            config: StoredValue::new(config),
        }
    }

    pub fn run(&self, action: AppAction) {
        if !matches!(action, AppAction::OpenPalette | AppAction::ShowShortcuts) {
            self.shell.modals.update(|m| m.palette_open = false);
        }

        if action.targets_chart() {
            self.run_on_chart(action);
            return;
        }

        match action {
            AppAction::Navigate(route) => {
                self.shell.modals.update(ModalState::close_all);
                self.router.navigate(route);
            }
            AppAction::OpenPalette => self.shell.modals.update(ModalState::open_palette),
            AppAction::CloseOverlays => self.shell.modals.update(ModalState::close_all),
            AppAction::ShowShortcuts => self.shell.modals.update(ModalState::toggle_help),
            AppAction::ToggleLanguage => self.app.toggle_language(),
            AppAction::ToggleFullscreen => toggle_fullscreen(),
            AppAction::Logout => self.logout(),
            _ => {}
        }
    }

    fn run_on_chart(&self, action: AppAction) {
        let Some(chart) = self.shell.chart.get_untracked() else {
            // Chart not mounted: open it, carrying a focus request along
            if let AppAction::FocusNode(id) = action {
                self.shell.pending_focus.set(Some(id));
            }
            self.router.navigate(Route::OrganizationChart);
            return;
        };

        match action {
            AppAction::ZoomIn => chart.zoom_in(),
            AppAction::ZoomOut => chart.zoom_out(),
            AppAction::ResetZoom => chart.reset_zoom(),
            AppAction::ToggleView => self.config.with_value(|config| chart.toggle_view(config)),
            AppAction::ExpandAll => chart.expand_all(),
            AppAction::CollapseAll => chart.collapse_all(),
            AppAction::FocusNode(id) => {
                chart.focus(&id);
            }
            _ => {}
        }
    }

    fn logout(&self) {
        let client = self.config.with_value(|config| ApiClient::for_session(config, &self.session));
        spawn_local(async move {
            // Local sign-out happens regardless of the server's answer
            if let Err(e) = api::logout(&client).await {
                web_sys::console::error_1(&format!("[AUTH] server logout failed: {}", e).into());
            }
        });
        self.session.sign_out();
        self.shell.modals.update(ModalState::close_all);
        self.router.redirect_after_login.set(None);
        self.router.navigate(Route::Login);
    }
}

pub fn use_dispatcher() -> Dispatcher {
    expect_context::<Dispatcher>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_actions_are_classified() {
        assert!(AppAction::ZoomIn.targets_chart());
        assert!(AppAction::FocusNode("pm".to_string()).targets_chart());
        assert!(!AppAction::ToggleFullscreen.targets_chart());
        assert!(!AppAction::Navigate(Route::Users).targets_chart());
    }
}
