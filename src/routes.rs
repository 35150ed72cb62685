//! Client-side Routes
//!
//! Path <-> route mapping and `history.pushState` navigation.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    OrganizationChart,
    Ministries,
    Departments,
    Positions,
    Attributes,
    Users,
    NotFound,
}

impl Route {
    /// Routes reachable from the sidebar and the command palette
    pub const NAVIGABLE: [Route; 7] = [
        Self::Dashboard,
        Self::OrganizationChart,
        Self::Ministries,
        Self::Departments,
        Self::Positions,
        Self::Attributes,
        Self::Users,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::OrganizationChart => "/organization-chart",
            Self::Ministries => "/ministries",
            Self::Departments => "/departments",
            Self::Positions => "/positions",
            Self::Attributes => "/attributes",
            Self::Users => "/users",
            Self::NotFound => "/404",
        }
    }

    pub fn from_path(path: &str) -> Self {
        // Ignore query string and fragment
        let path = path.split(['?', '#']).next().unwrap_or("");
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Dashboard;
        }
        [Self::Login]
            .into_iter()
            .chain(Self::NAVIGABLE)
            .find(|route| route.path() == trimmed)
            .unwrap_or(Self::NotFound)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::OrganizationChart => "Organization Chart",
            Self::Ministries => "Ministries",
            Self::Departments => "Departments",
            Self::Positions => "Positions",
            Self::Attributes => "Attributes",
            Self::Users => "Users",
            Self::NotFound => "Not found",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// Current browser path, `/` when unavailable
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// Router state provided via context
#[derive(Clone, Copy)]
pub struct Router {
    pub route: ReadSignal<Route>,
    set_route: WriteSignal<Route>,
    /// Where to go after a successful login
    pub redirect_after_login: RwSignal<Option<Route>>,
}

impl Router {
    /// Create the router and follow browser back/forward navigation
    pub fn new() -> Self {
        let (route, set_route) = signal(Route::from_path(&current_path()));
        let router = Self {
            route,
            set_route,
            redirect_after_login: RwSignal::new(None),
        };

        let on_popstate = wasm_bindgen::closure::Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
            set_route.set(Route::from_path(&current_path()));
        });
        if let Some(win) = web_sys::window() {
            let _ = win.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
        }
        on_popstate.forget();

        router
    }

    pub fn navigate(&self, route: Route) {
        if self.route.get_untracked() == route {
            return;
        }
        web_sys::console::log_1(&format!("[ROUTE] -> {}", route.path()).into());
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(route.path()));
        }
        self.set_route.set(route);
    }

    /// Send an unauthenticated visitor to the login screen, remembering the target
    pub fn require_login(&self) {
        let current = self.route.get_untracked();
        if current.requires_auth() {
            self.redirect_after_login.set(Some(current));
            self.navigate(Route::Login);
        }
    }

    /// Leave the login screen for the remembered target (or the dashboard)
    pub fn finish_login(&self) {
        let target = self.redirect_after_login.get_untracked().unwrap_or(Route::Dashboard);
        self.redirect_after_login.set(None);
        self.navigate(target);
    }
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for route in Route::NAVIGABLE.into_iter().chain([Route::Login]) {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn tolerant_path_parsing() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
        assert_eq!(Route::from_path("/positions/"), Route::Positions);
        assert_eq!(Route::from_path("/users?page=2"), Route::Users);
        assert_eq!(Route::from_path("/organization-chart#pm"), Route::OrganizationChart);
        assert_eq!(Route::from_path("/nope"), Route::NotFound);
    }

    #[test]
    fn only_login_is_public() {
        assert!(!Route::Login.requires_auth());
        assert!(Route::NAVIGABLE.iter().all(Route::requires_auth));
        assert!(Route::NotFound.requires_auth());
    }
}
