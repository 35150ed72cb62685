//! Modal Component
//!
//! Centered dialog over a dimmed backdrop. Clicking the backdrop or
//! pressing Escape closes it.

use keyboard_shortcuts::Chord;
use leptos::ev;
use leptos::prelude::*;

/// Whether a keypress dismisses the open dialog
fn closes_dialog(chord: &Chord) -> bool {
    chord.is_escape() && !chord.primary && !chord.alt
}

#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let dialog_class = format!("modal {}", class);

    let on_escape = window_event_listener(ev::keydown, move |ev| {
        if closes_dialog(&Chord::from_event(&ev)) {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || on_escape.remove());

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div
                class=dialog_class
                role="dialog"
                aria-modal="true"
                on:click=|ev| ev.stop_propagation()
            >
                <header class="modal-header">
                    <h2>{move || title.get()}</h2>
                    <button class="modal-close" title="Close (Esc)" on:click=move |_| on_close.run(())>"×"</button>
                </header>
                <div class="modal-body">{children()}</div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_dialog() {
        assert!(closes_dialog(&Chord::key("Escape")));
        assert!(closes_dialog(&Chord::key("Esc")));
        assert!(closes_dialog(&Chord::new("Escape", false, false, true)));
        assert!(!closes_dialog(&Chord::new("Escape", true, false, false)));
        assert!(!closes_dialog(&Chord::key("Enter")));
    }
}
