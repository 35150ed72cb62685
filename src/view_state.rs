//! Org Chart View State
//!
//! Plain state types behind the org chart page: render mode, zoom,
//! expanded nodes, modal visibility and the view-transition progress.
//! Components wrap these in signals.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::tree::{find_path, PositionNode};

/// Which title of a bilingual pair is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Fr => "FR",
        }
    }
}

/// Org chart render mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Tree,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Tree => Self::Grid,
            Self::Grid => Self::Tree,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tree => "Tree",
            Self::Grid => "Grid",
        }
    }
}

/// Zoom factor, always within [`Zoom::MIN`, `Zoom::MAX`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f64);

impl Zoom {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 2.0;
    pub const STEP: f64 = 0.1;

    pub fn new(factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::default();
        }
        // Round to one decimal so repeated steps don't drift
        let rounded = (factor * 10.0).round() / 10.0;
        Self(rounded.clamp(Self::MIN, Self::MAX))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + Self::STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - Self::STEP)
    }

    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    pub fn can_zoom_in(self) -> bool {
        self.0 < Self::MAX
    }

    pub fn can_zoom_out(self) -> bool {
        self.0 > Self::MIN
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Set of expanded node ids. Grows with interaction; cleared only on remount
/// or by an explicit collapse-all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpansionSet(HashSet<String>);

impl ExpansionSet {
    /// Start with only the root open
    pub fn with_root(root: &PositionNode) -> Self {
        let mut set = Self::default();
        set.expand(&root.id);
        set
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.0.remove(id) {
            self.0.insert(id.to_string());
        }
    }

    pub fn expand(&mut self, id: &str) {
        self.0.insert(id.to_string());
    }

    pub fn collapse(&mut self, id: &str) {
        self.0.remove(id);
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self, root: &PositionNode) {
        fn walk(node: &PositionNode, set: &mut HashSet<String>) {
            if !node.is_leaf() {
                set.insert(node.id.clone());
            }
            for child in &node.children {
                walk(child, set);
            }
        }
        walk(root, &mut self.0);
    }

    pub fn collapse_all(&mut self) {
        self.0.clear();
    }

    /// Expand every ancestor of `id` so it becomes visible.
    /// Returns `false` when the id is not in the tree.
    pub fn expand_path(&mut self, root: &PositionNode, id: &str) -> bool {
        let Some(path) = find_path(root, id) else { return false };
        for ancestor in &path[..path.len() - 1] {
            self.0.insert(ancestor.id.clone());
        }
        true
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Visibility of the org chart overlays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub palette_open: bool,
    pub help_open: bool,
    /// Node whose detail dialog is open
    pub detail_node: Option<String>,
}

impl ModalState {
    pub fn any_open(&self) -> bool {
        self.palette_open || self.help_open || self.detail_node.is_some()
    }

    pub fn open_palette(&mut self) {
        self.close_all();
        self.palette_open = true;
    }

    pub fn toggle_help(&mut self) {
        let open = !self.help_open;
        self.close_all();
        self.help_open = open;
    }

    pub fn show_detail(&mut self, id: &str) {
        self.close_all();
        self.detail_node = Some(id.to_string());
    }

    pub fn close_all(&mut self) {
        *self = Self::default();
    }
}

/// Progress percentage of the cosmetic view transition after `step` of `steps` ticks
pub fn transition_progress(step: u32, steps: u32) -> u32 {
    if steps == 0 {
        return 100;
    }
    (step.min(steps) * 100) / steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::org_chart;

    #[test]
    fn view_mode_toggle_always_flips() {
        for start in [ViewMode::Tree, ViewMode::Grid] {
            assert_ne!(start.toggled(), start);
            assert_eq!(start.toggled().toggled(), start);
        }
        assert_eq!(Language::En.toggled(), Language::Fr);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut zoom = Zoom::default();
        for _ in 0..50 {
            zoom = zoom.zoom_in();
            assert!(zoom.factor() <= Zoom::MAX);
        }
        assert_eq!(zoom.factor(), 2.0);
        assert!(!zoom.can_zoom_in());

        for _ in 0..50 {
            zoom = zoom.zoom_out();
            assert!(zoom.factor() >= Zoom::MIN);
        }
        assert_eq!(zoom.factor(), 0.5);
        assert!(!zoom.can_zoom_out());

        assert_eq!(Zoom::new(7.3).factor(), 2.0);
        assert_eq!(Zoom::new(-1.0).factor(), 0.5);
        assert_eq!(Zoom::new(f64::NAN), Zoom::default());
    }

    #[test]
    fn zoom_steps_do_not_drift() {
        let zoom = Zoom::default().zoom_in().zoom_in().zoom_in().zoom_out().zoom_out().zoom_out();
        assert_eq!(zoom, Zoom::default());
        assert_eq!(Zoom::new(1.3).percent(), 130);
    }

    #[test]
    fn double_toggle_is_identity() {
        let root = org_chart().unwrap();
        let mut set = ExpansionSet::with_root(&root);
        let before = set.clone();
        set.toggle("min-health");
        assert!(set.is_expanded("min-health"));
        set.toggle("min-health");
        assert_eq!(set, before);

        set.toggle("pm");
        set.toggle("pm");
        assert_eq!(set, before);
    }

    #[test]
    fn expand_all_covers_every_parent() {
        let root = org_chart().unwrap();
        let mut set = ExpansionSet::default();
        set.expand_all(&root);
        assert!(set.is_expanded("pm"));
        assert!(set.is_expanded("adm-tax-policy"));
        // Leaves are never recorded
        assert!(!set.is_expanded("dir-personal-tax"));
        assert_eq!(crate::tree::visible_rows(&root, set.ids()).len(), crate::tree::node_count(&root));

        set.collapse_all();
        assert!(set.is_empty());
    }

    #[test]
    fn expand_path_opens_ancestors_only() {
        let root = org_chart().unwrap();
        let mut set = ExpansionSet::default();
        assert!(set.expand_path(&root, "dir-student-aid"));
        assert!(set.is_expanded("pm"));
        assert!(set.is_expanded("adm-higher-ed"));
        assert!(!set.is_expanded("dir-student-aid"));
        assert_eq!(set.len(), 4);

        assert!(!set.expand_path(&root, "missing"));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn modals_are_exclusive() {
        let mut modals = ModalState::default();
        modals.show_detail("pm");
        modals.open_palette();
        assert!(modals.palette_open);
        assert_eq!(modals.detail_node, None);

        modals.toggle_help();
        assert!(modals.help_open && !modals.palette_open);
        modals.toggle_help();
        assert!(!modals.any_open());
    }

    #[test]
    fn transition_progress_bounds() {
        assert_eq!(transition_progress(0, 10), 0);
        assert_eq!(transition_progress(5, 10), 50);
        assert_eq!(transition_progress(15, 10), 100);
        assert_eq!(transition_progress(3, 0), 100);
    }
}
