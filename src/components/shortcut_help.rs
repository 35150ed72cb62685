//! Shortcut Help Component
//!
//! Dialog listing every keyboard shortcut.

use leptos::prelude::*;

use crate::actions::{use_dispatcher, use_shell, AppAction};
use crate::components::Modal;
use crate::shortcuts::help_rows;

/// Keyboard shortcut reference dialog
#[component]
pub fn ShortcutHelp() -> impl IntoView {
    let shell = use_shell();
    let dispatcher = use_dispatcher();
    let rows = StoredValue::new(help_rows());

    view! {
        <Show when=move || shell.modals.with(|m| m.help_open)>
            <Modal
                title="Keyboard shortcuts".to_string()
                on_close=move |_| dispatcher.run(AppAction::CloseOverlays)
                class="shortcut-help"
            >
                <table class="shortcut-table">
                    <tbody>
                        {rows.with_value(|rows| {
                            rows.iter()
                                .map(|(keys, description)| view! {
                                    <tr>
                                        <td><kbd>{keys.clone()}</kbd></td>
                                        <td>{*description}</td>
                                    </tr>
                                })
                                .collect_view()
                        })}
                    </tbody>
                </table>
            </Modal>
        </Show>
    }
}
