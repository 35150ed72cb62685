//! Keyboard Shortcuts
//!
//! App-level key bindings on top of the `keyboard-shortcuts` crate.

use keyboard_shortcuts::{bind_global_keydown, Chord};

use crate::actions::{AppAction, Dispatcher};

/// `(binding, action, description)` for every shortcut
pub fn bindings() -> Vec<(&'static str, AppAction, &'static str)> {
    vec![
        ("Ctrl+K", AppAction::OpenPalette, "Open command palette"),
        ("+", AppAction::ZoomIn, "Zoom in"),
        ("=", AppAction::ZoomIn, "Zoom in"),
        ("-", AppAction::ZoomOut, "Zoom out"),
        ("0", AppAction::ResetZoom, "Reset zoom"),
        ("T", AppAction::ToggleView, "Toggle tree / grid view"),
        ("E", AppAction::ExpandAll, "Expand all"),
        ("C", AppAction::CollapseAll, "Collapse all"),
        ("F", AppAction::ToggleFullscreen, "Toggle fullscreen"),
        ("L", AppAction::ToggleLanguage, "Switch language"),
        ("?", AppAction::ShowShortcuts, "Show keyboard shortcuts"),
        ("Escape", AppAction::CloseOverlays, "Close dialogs"),
    ]
}

/// Action bound to `chord`, if any
pub fn action_for(chord: &Chord) -> Option<AppAction> {
    bindings()
        .into_iter()
        .find(|(spec, _, _)| Chord::parse(spec).as_ref() == Some(chord))
        .map(|(_, action, _)| action)
}

/// Shortcut help rows, one per distinct action
pub fn help_rows() -> Vec<(String, &'static str)> {
    let mut rows: Vec<(String, &'static str)> = Vec::new();
    for (spec, _, description) in bindings() {
        let label = Chord::parse(spec).map(|c| c.to_string()).unwrap_or_else(|| spec.to_string());
        match rows.iter_mut().find(|(_, d)| *d == description) {
            Some((existing, _)) => {
                existing.push_str(" / ");
                existing.push_str(&label);
            }
            None => rows.push((label, description)),
        }
    }
    rows
}

/// Route global keydown events to the dispatcher
pub fn bind(dispatcher: Dispatcher) {
    bind_global_keydown(move |chord| match action_for(chord) {
        Some(action) => {
            web_sys::console::log_1(&format!("[KEYS] {} -> {:?}", chord, action).into());
            dispatcher.run(action);
            true
        }
        None => false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_parse() {
        for (spec, _, _) in bindings() {
            assert!(Chord::parse(spec).is_some(), "unparseable binding {}", spec);
        }
    }

    #[test]
    fn chords_map_to_actions() {
        assert_eq!(action_for(&Chord::new("k", true, false, false)), Some(AppAction::OpenPalette));
        assert_eq!(action_for(&Chord::key("=")), Some(AppAction::ZoomIn));
        assert_eq!(action_for(&Chord::new("?", false, false, true)), Some(AppAction::ShowShortcuts));
        assert_eq!(action_for(&Chord::key("Escape")), Some(AppAction::CloseOverlays));
        assert_eq!(action_for(&Chord::key("k")), None);
        assert_eq!(action_for(&Chord::new("t", true, false, false)), None);
    }

    #[test]
    fn help_merges_aliases() {
        let rows = help_rows();
        let zoom_in = rows.iter().find(|(_, d)| *d == "Zoom in").unwrap();
        assert_eq!(zoom_in.0, "+ / =");
        assert_eq!(rows.len(), bindings().len() - 1);
    }
}
