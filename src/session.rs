//! Session State
//!
//! The signed-in user and bearer token, persisted in localStorage so a
//! reload keeps the user signed in.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::api::QueryClient;
use crate::config::local_storage;
use crate::models::SessionUser;

pub const SESSION_STORAGE_KEY: &str = "org_chart.session";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    /// Parse a stored session; anything malformed or tokenless is discarded
    pub fn from_stored(json: &str) -> Option<Self> {
        serde_json::from_str::<Session>(json)
            .ok()
            .filter(|s| !s.token.trim().is_empty())
    }
}

fn load_stored() -> Option<Session> {
    let json = local_storage()?.get_item(SESSION_STORAGE_KEY).ok().flatten()?;
    let session = Session::from_stored(&json);
    if session.is_none() {
        web_sys::console::error_1(&"[AUTH] Discarding malformed stored session".into());
    }
    session
}

fn persist(session: Option<&Session>) {
    let Some(storage) = local_storage() else { return };
    let result = match session.map(serde_json::to_string) {
        Some(Ok(json)) => storage.set_item(SESSION_STORAGE_KEY, &json),
        Some(Err(e)) => {
            web_sys::console::error_1(&format!("[AUTH] Could not serialize session: {}", e).into());
            return;
        }
        None => storage.remove_item(SESSION_STORAGE_KEY),
    };
    if result.is_err() {
        web_sys::console::error_1(&"[AUTH] Could not write session to localStorage".into());
    }
}

/// Session signal provided via context
///
/// Owns the query cache's lifetime: cached responses never outlive the
/// user who fetched them.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
    queries: QueryClient,
}

impl SessionContext {
    /// Restore any stored session
    pub fn new(queries: QueryClient) -> Self {
        Self {
            session: RwSignal::new(load_stored()),
            queries,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// Whether the signed-in user may mutate records
    pub fn can_edit(&self) -> bool {
        self.session.with(|s| s.as_ref().is_some_and(|s| s.user.role.can_edit()))
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.session.with_untracked(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn sign_in(&self, session: Session) {
        web_sys::console::log_1(&format!("[AUTH] Signed in as {}", session.user.username).into());
        persist(Some(&session));
        self.queries.clear();
        self.session.set(Some(session));
    }

    pub fn refresh_user(&self, user: SessionUser) {
        self.session.update(|s| {
            if let Some(s) = s {
                s.user = user;
            }
        });
        self.session.with_untracked(|s| persist(s.as_ref()));
    }

    pub fn sign_out(&self) {
        web_sys::console::log_1(&"[AUTH] Signed out".into());
        persist(None);
        self.queries.clear();
        self.session.set(None);
    }
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn stored_session_round_trip() {
        let session = Session {
            token: "abc".to_string(),
            user: SessionUser {
                id: 7,
                username: "admin".to_string(),
                full_name: "System Admin".to_string(),
                role: Role::Admin,
            },
        };
        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(Session::from_stored(&json), Some(session));
    }

    #[test]
    fn malformed_sessions_are_discarded() {
        assert_eq!(Session::from_stored("not json"), None);
        assert_eq!(
            Session::from_stored(r#"{"token":" ","user":{"id":1,"username":"a","full_name":"A","role":"viewer"}}"#),
            None
        );
    }
}
