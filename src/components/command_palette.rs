//! Command Palette Component
//!
//! Ctrl+K overlay listing app commands and matching positions.
//! Arrow keys move the selection, Enter runs it, Escape closes.

use leptos::html;
use leptos::prelude::*;

use crate::actions::{use_dispatcher, use_shell};
use crate::context::use_app_context;
use crate::org_chart::use_hierarchy;
use crate::palette::{filter_entries, wrap_selection, PaletteEntry};
use crate::view_state::ModalState;

#[component]
pub fn CommandPalette() -> impl IntoView {
    let shell = use_shell();
    let dispatcher = use_dispatcher();
    let hierarchy = use_hierarchy();
    let ctx = use_app_context();

    let (query, set_query) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);
    let input_ref = NodeRef::<html::Input>::new();

    let is_open = move || shell.modals.with(|m| m.palette_open);

    let entries = Memo::new(move |_| {
        let q = query.get();
        let lang = ctx.language.get();
        hierarchy.with(|root| filter_entries(&q, root, lang))
    });

    // Fresh query and focus each time the palette opens
    Effect::new(move |_| {
        if is_open() {
            set_query.set(String::new());
            set_selected_idx.set(0);
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
            }
        }
    });

    let run_entry = move |entry: PaletteEntry| {
        web_sys::console::log_1(&format!("[KEYS] palette -> {}", entry.label).into());
        shell.modals.update(ModalState::close_all);
        dispatcher.run(entry.action);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let len = entries.with(Vec::len);
        match ev.key().as_str() {
            "ArrowDown" => {
                ev.prevent_default();
                set_selected_idx.update(|i| *i = wrap_selection(*i, 1, len));
            }
            "ArrowUp" => {
                ev.prevent_default();
                set_selected_idx.update(|i| *i = wrap_selection(*i, -1, len));
            }
            "Enter" => {
                ev.prevent_default();
                let chosen = entries.with(|list| list.get(selected_idx.get_untracked()).cloned());
                if let Some(entry) = chosen {
                    run_entry(entry);
                }
            }
            "Escape" => {
                ev.prevent_default();
                shell.modals.update(ModalState::close_all);
            }
            _ => {}
        }
    };

    view! {
        <Show when=is_open>
            <div class="modal-backdrop palette-backdrop" on:click=move |_| shell.modals.update(ModalState::close_all)>
                <div class="command-palette" role="dialog" aria-label="Command palette" on:click=|ev| ev.stop_propagation()>
                    <input
                        node_ref=input_ref
                        type="text"
                        class="palette-input"
                        placeholder="Type a command or search positions..."
                        autocomplete="off"
                        prop:value=move || query.get()
                        on:input=move |ev| {
                            set_query.set(event_target_value(&ev));
                            set_selected_idx.set(0);
                        }
                        on:keydown=on_keydown
                    />
                    <ul class="palette-results" role="listbox">
                        {move || {
                            let list = entries.get();
                            if list.is_empty() {
                                return view! { <li class="palette-empty">"No matching commands"</li> }.into_any();
                            }
                            let selected = selected_idx.get();
                            list.into_iter()
                                .enumerate()
                                .map(|(i, entry)| {
                                    let is_selected = i == selected;
                                    let label = entry.label.clone();
                                    let hint = entry.hint.clone();
                                    view! {
                                        <li
                                            role="option"
                                            aria-selected=is_selected.to_string()
                                            class=if is_selected { "palette-item selected" } else { "palette-item" }
                                            on:mouseenter=move |_| set_selected_idx.set(i)
                                            on:click=move |_| run_entry(entry.clone())
                                        >
                                            <span class="palette-label">{label}</span>
                                            {hint.map(|h| view! { <span class="palette-hint">{h}</span> })}
                                        </li>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </ul>
                </div>
            </div>
        </Show>
    }
}
