//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiError;
use crate::routes::Router;
use crate::session::SessionContext;
use crate::view_state::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Dismissible banner message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current banner - read
    pub notice: ReadSignal<Option<Notice>>,
    /// Current banner - write
    set_notice: WriteSignal<Option<Notice>>,
    /// Display language for bilingual names - read
    pub language: ReadSignal<Language>,
    /// Display language for bilingual names - write
    set_language: WriteSignal<Language>,
    session: SessionContext,
    router: Router,
}

impl AppContext {
    pub fn new(
        notice: (ReadSignal<Option<Notice>>, WriteSignal<Option<Notice>>),
        language: (ReadSignal<Language>, WriteSignal<Language>),
        session: SessionContext,
        router: Router,
    ) -> Self {
        Self {
            notice: notice.0,
            set_notice: notice.1,
            language: language.0,
            set_language: language.1,
            session,
            router,
        }
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.set_notice.set(Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }));
    }

    /// Log a failed request and surface it as a banner.
    /// An expired session signs the user out and returns to the login screen.
    pub fn report_error(&self, action: &str, err: &ApiError) {
        web_sys::console::error_1(&format!("[APP] {} failed: {}", action, err).into());
        if *err == ApiError::Unauthorized {
            self.session.sign_out();
            self.router.require_login();
        }
        self.set_notice.set(Some(Notice {
            kind: NoticeKind::Error,
            message: format!("{} failed: {}", action, err),
        }));
    }

    pub fn dismiss_notice(&self) {
        self.set_notice.set(None);
    }

    pub fn toggle_language(&self) {
        self.set_language.update(|l| *l = l.toggled());
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
