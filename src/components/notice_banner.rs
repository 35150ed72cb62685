//! Notice Banner Component
//!
//! Dismissible success/error message under the header.

use leptos::prelude::*;

use crate::context::{use_app_context, NoticeKind};

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "notice notice-success",
                NoticeKind::Error => "notice notice-error",
            };
            view! {
                <div class=class role="status">
                    <span class="notice-message">{notice.message}</span>
                    <button class="notice-dismiss" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                </div>
            }
        })
    }
}
