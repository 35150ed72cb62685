//! Navigation Sidebar Component
//!
//! Route links, signed-in user, language switch and logout.

use leptos::prelude::*;

use crate::actions::{use_dispatcher, AppAction};
use crate::context::use_app_context;
use crate::routes::{use_router, Route};
use crate::session::use_session;

#[component]
pub fn NavSidebar() -> impl IntoView {
    let ctx = use_app_context();
    let router = use_router();
    let session = use_session();
    let dispatcher = use_dispatcher();

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">"Org Chart"</div>
            <ul class="nav-links">
                {Route::NAVIGABLE.iter().map(|&route| {
                    let is_active = move || router.route.get() == route;
                    view! {
                        <li>
                            <a
                                href=route.path()
                                class=move || if is_active() { "nav-link active" } else { "nav-link" }
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    dispatcher.run(AppAction::Navigate(route));
                                }
                            >
                                {route.title()}
                            </a>
                        </li>
                    }
                }).collect_view()}
            </ul>
            <div class="nav-footer">
                <button class="btn btn-small" title="Command palette (Ctrl+K)" on:click=move |_| dispatcher.run(AppAction::OpenPalette)>
                    "Ctrl+K"
                </button>
                <button class="btn btn-small" title="Switch language (L)" on:click=move |_| ctx.toggle_language()>
                    {move || ctx.language.get().code()}
                </button>
                {move || session.user().map(|user| view! {
                    <div class="nav-user">
                        <span class="nav-user-name">{user.full_name}</span>
                        <span class="nav-user-role">{user.role.as_str()}</span>
                    </div>
                })}
                <button class="btn btn-small" on:click=move |_| dispatcher.run(AppAction::Logout)>"Log out"</button>
            </div>
        </nav>
    }
}
