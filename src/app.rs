//! Org Chart Frontend App
//!
//! Provides the shared contexts, binds global shortcuts and switches
//! screens on the current route behind the session guard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::actions::{Dispatcher, Shell};
use crate::api::{self, ApiClient, QueryClient};
use crate::components::{
    crud_page, CommandPalette, Dashboard, LoginPage, NavSidebar, NoticeBanner, OrgChartPage, ShortcutHelp, StoreSync,
};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::models::{Attribute, Department, Ministry, Position, User};
use crate::org_chart::Hierarchy;
use crate::routes::{Route, Router};
use crate::session::SessionContext;
use crate::shortcuts;
use crate::store::AppState;
use crate::view_state::Language;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    let queries = QueryClient::new();
    let session = SessionContext::new(queries);
    let router = Router::new();
    let (notice, set_notice) = signal(None);
    let (language, set_language) = signal(Language::default());
    let ctx = AppContext::new((notice, set_notice), (language, set_language), session, router);
    let shell = Shell::new();
    let dispatcher = Dispatcher::new(shell, router, session, ctx, config.clone());

    // Provide context to all children
    provide_context(config.clone());
    provide_context(session);
    provide_context(router);
    provide_context(ctx);
    provide_context(queries);
    provide_context(Store::new(AppState::default()));
    provide_context(Hierarchy::load());
    provide_context(shell);
    provide_context(dispatcher);

    shortcuts::bind(dispatcher);

    // Confirm a restored session is still valid
    if let Some(token) = session.token_untracked() {
        let client = ApiClient::new(config.api_base_url.clone(), Some(token));
        spawn_local(async move {
            match api::me(&client).await {
                Ok(user) => session.refresh_user(user),
                Err(e) => ctx.report_error("Restoring session", &e),
            }
        });
    }

    // Route guard
    Effect::new(move |_| {
        let route = router.route.get();
        let signed_in = session.is_authenticated();
        if route.requires_auth() && !signed_in {
            router.require_login();
        } else if route == Route::Login && signed_in {
            router.finish_login();
        }
    });

    // Document title follows the route
    Effect::new(move |_| {
        let title = format!("{} | Org Chart", router.route.get().title());
        document().set_title(&title);
    });

    let screen = move || match router.route.get() {
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Dashboard => view! { <Dashboard /> }.into_any(),
        Route::OrganizationChart => view! { <OrgChartPage /> }.into_any(),
        Route::Ministries => crud_page::<Ministry>().into_any(),
        Route::Departments => crud_page::<Department>().into_any(),
        Route::Positions => crud_page::<Position>().into_any(),
        Route::Attributes => crud_page::<Attribute>().into_any(),
        Route::Users => crud_page::<User>().into_any(),
        Route::NotFound => view! {
            <section class="not-found">
                <h1>"Page not found"</h1>
                <a href=Route::Dashboard.path() on:click=move |ev| {
                    ev.prevent_default();
                    router.navigate(Route::Dashboard);
                }>"Back to the dashboard"</a>
            </section>
        }
        .into_any(),
    };

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=move || view! { <NoticeBanner /> <LoginPage /> }
        >
            <StoreSync />
            <div class="app-layout">
                <NavSidebar />
                <main class="main-content">
                    <NoticeBanner />
                    {screen}
                </main>
            </div>
            <CommandPalette />
            <ShortcutHelp />
        </Show>
    }
}
