//! Login Page Component
//!
//! Username/password form. On success the session is stored and the user
//! is sent to the route they originally asked for.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiClient, ApiError};
use crate::config::use_config;
use crate::routes::use_router;
use crate::session::use_session;
use crate::validation::{self, ValidationError};

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let config = use_config();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (field_error, set_field_error) = signal::<Option<ValidationError>>(None);
    let (login_error, set_login_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        set_login_error.set(None);

        let checked = validation::required("Username", &username.get_untracked())
            .and_then(|user| validation::required("Password", &password.get_untracked()).map(|_| user));
        let user = match checked {
            Ok(user) => user,
            Err(e) => {
                set_field_error.set(Some(e));
                return;
            }
        };
        set_field_error.set(None);
        set_loading.set(true);

        let client = ApiClient::new(config.api_base_url.clone(), None);
        let pass = password.get_untracked();
        spawn_local(async move {
            match api::login(&client, &user, &pass).await {
                Ok(new_session) => {
                    set_password.set(String::new());
                    session.sign_in(new_session);
                    router.finish_login();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[AUTH] Login failed: {}", e).into());
                    let message = match e {
                        ApiError::Unauthorized => "Invalid username or password".to_string(),
                        other => other.to_string(),
                    };
                    set_login_error.set(Some(message));
                }
            }
            set_loading.set(false);
        });
    };

    let error_for = move |field: &'static str| {
        move || field_error.get().filter(|e| e.field() == field).map(|e| view! { <span class="field-error">{e.to_string()}</span> })
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"Sign in"</h1>
                {move || login_error.get().map(|msg| view! { <div class="notice notice-error">{msg}</div> })}
                <label class="form-field">
                    <span class="form-label">"Username"</span>
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    {error_for("Username")}
                </label>
                <label class="form-field">
                    <span class="form-label">"Password"</span>
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    {error_for("Password")}
                </label>
                <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                    {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
