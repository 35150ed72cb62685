//! Store Sync Component
//!
//! Keeps the global store's unfiltered resource lists current while a
//! session exists. Refetches a list whenever its query version changes.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, use_query_client, ApiClient, QueryKey};
use crate::config::use_config;
use crate::context::use_app_context;
use crate::entities::CrudEntity;
use crate::models::{Attribute, Department, Ministry, Position, User};
use crate::session::use_session;
use crate::store::use_app_store;

fn sync_resource<T: CrudEntity>() {
    let ctx = use_app_context();
    let session = use_session();
    let queries = use_query_client();
    let store = use_app_store();
    let config = StoredValue::new(use_config());

    Effect::new(move |_| {
        let version = queries.version(T::RESOURCE);
        if !session.is_authenticated() {
            return;
        }
        let client = config.with_value(|config| ApiClient::for_session(config, &session));
        spawn_local(async move {
            match api::list::<T>(&queries, &client, QueryKey::list(T::RESOURCE)).await {
                Ok(items) => {
                    web_sys::console::log_1(
                        &format!("[API] Synced {} {} (v{})", items.len(), T::PLURAL.to_lowercase(), version).into(),
                    );
                    T::replace_in_store(&store, items);
                }
                Err(e) => ctx.report_error(&format!("Loading {}", T::PLURAL.to_lowercase()), &e),
            }
        });
    });
}

/// Renders nothing; owns the sync effects
#[component]
pub fn StoreSync() -> impl IntoView {
    sync_resource::<Ministry>();
    sync_resource::<Department>();
    sync_resource::<Position>();
    sync_resource::<Attribute>();
    sync_resource::<User>();
}
