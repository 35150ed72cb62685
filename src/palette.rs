//! Command Palette Entries
//!
//! Static palette commands plus "jump to position" entries, filtered with
//! an in-order fuzzy match.

use crate::actions::AppAction;
use crate::routes::Route;
use crate::tree::{search, PositionNode};
use crate::view_state::Language;

/// Maximum number of entries shown at once
pub const MAX_RESULTS: usize = 8;

/// Simple fuzzy match: check if query chars appear in order in the target
pub fn fuzzy_match(query: &str, target: &str) -> bool {
    let query = query.to_lowercase();
    let target = target.to_lowercase();

    let mut target_chars = target.chars();
    for query_char in query.chars() {
        loop {
            match target_chars.next() {
                Some(c) if c == query_char => break,
                Some(_) => continue,
                None => return false,
            }
        }
    }
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub label: String,
    /// Secondary text (shortcut hint or department)
    pub hint: Option<String>,
    pub action: AppAction,
}

impl PaletteEntry {
    fn new(label: &str, hint: Option<&str>, action: AppAction) -> Self {
        Self {
            label: label.to_string(),
            hint: hint.map(str::to_string),
            action,
        }
    }
}

/// Commands available regardless of the query
pub fn static_entries() -> Vec<PaletteEntry> {
    use AppAction::*;

    let mut entries: Vec<PaletteEntry> = Route::NAVIGABLE
        .iter()
        .map(|route| PaletteEntry {
            label: format!("Go to {}", route.title()),
            hint: Some(route.path().to_string()),
            action: Navigate(*route),
        })
        .collect();

    entries.extend([
        PaletteEntry::new("Zoom in", Some("+"), ZoomIn),
        PaletteEntry::new("Zoom out", Some("-"), ZoomOut),
        PaletteEntry::new("Reset zoom", Some("0"), ResetZoom),
        PaletteEntry::new("Toggle tree / grid view", Some("T"), ToggleView),
        PaletteEntry::new("Expand all", Some("E"), ExpandAll),
        PaletteEntry::new("Collapse all", Some("C"), CollapseAll),
        PaletteEntry::new("Toggle fullscreen", Some("F"), ToggleFullscreen),
        PaletteEntry::new("Switch language", Some("L"), ToggleLanguage),
        PaletteEntry::new("Keyboard shortcuts", Some("?"), ShowShortcuts),
        PaletteEntry::new("Log out", None, Logout),
    ]);
    entries
}

/// Entries matching `query`: static commands first, then positions
pub fn filter_entries(query: &str, root: Option<&PositionNode>, lang: Language) -> Vec<PaletteEntry> {
    let query = query.trim();
    let mut results: Vec<PaletteEntry> = static_entries()
        .into_iter()
        .filter(|entry| query.is_empty() || fuzzy_match(query, &entry.label))
        .collect();

    if let Some(root) = root {
        results.extend(search(root, query, lang).into_iter().map(|node| PaletteEntry {
            label: node.title(lang).to_string(),
            hint: node.holder.clone().or_else(|| node.department.clone()),
            action: AppAction::FocusNode(node.id.clone()),
        }));
    }

    results.truncate(MAX_RESULTS);
    results
}

/// Move the highlighted index by `delta`, wrapping around
pub fn wrap_selection(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (((current as isize + delta) % len + len) % len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::org_chart;

    #[test]
    fn fuzzy_match_is_in_order_and_case_insensitive() {
        assert!(fuzzy_match("zin", "Zoom in"));
        assert!(fuzzy_match("", "anything"));
        assert!(!fuzzy_match("niz", "Zoom in"));
        assert!(!fuzzy_match("zoom in!", "Zoom in"));
    }

    #[test]
    fn empty_query_lists_static_commands() {
        let results = filter_entries("", None, Language::En);
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].action, AppAction::Navigate(Route::Dashboard));
    }

    #[test]
    fn query_narrows_commands() {
        let results = filter_entries("zoom", None, Language::En);
        let actions: Vec<_> = results.into_iter().map(|e| e.action).collect();
        assert_eq!(actions, [AppAction::ZoomIn, AppAction::ZoomOut, AppAction::ResetZoom]);
    }

    #[test]
    fn positions_are_searchable() {
        let root = org_chart().unwrap();
        let results = filter_entries("Chief Medical", Some(&root), Language::En);
        assert!(results.iter().any(|e| e.action == AppAction::FocusNode("cmo".to_string())));
        let cmo = results.iter().find(|e| e.label == "Chief Medical Officer").unwrap();
        assert_eq!(cmo.hint.as_deref(), Some("Dr. Olivia Grant"));
    }

    #[test]
    fn selection_wraps() {
        assert_eq!(wrap_selection(0, -1, 5), 4);
        assert_eq!(wrap_selection(4, 1, 5), 0);
        assert_eq!(wrap_selection(2, 1, 5), 3);
        assert_eq!(wrap_selection(3, 1, 0), 0);
    }
}
