//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Holds the
//! unfiltered resource lists used for lookups and dashboard counts.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::entities::Lookups;
use crate::models::{Attribute, Department, Ministry, Position, User};
use crate::view_state::Language;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub ministries: Vec<Ministry>,
    pub departments: Vec<Department>,
    pub positions: Vec<Position>,
    pub attributes: Vec<Attribute>,
    pub users: Vec<User>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Tracked snapshot of the lists used to resolve ids into names
pub fn store_lookups(store: &AppStore, language: Language) -> Lookups {
    Lookups {
        ministries: store.ministries().get(),
        departments: store.departments().get(),
        positions: store.positions().get(),
        language,
    }
}

/// Record counts shown on the dashboard
pub fn store_counts(store: &AppStore) -> [(&'static str, usize); 5] {
    [
        ("Ministries", store.ministries().read().len()),
        ("Departments", store.departments().read().len()),
        ("Positions", store.positions().read().len()),
        ("Attributes", store.attributes().read().len()),
        ("Users", store.users().read().len()),
    ]
}
