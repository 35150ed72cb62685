//! Org Chart Controller
//!
//! Reactive wrapper around the view-state types. Lives as long as the org
//! chart page is mounted; nothing here is persisted.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::config::AppConfig;
use crate::tree::{breadcrumb, org_chart, visible_rows, BreadcrumbItem, GridRow, PositionNode};
use crate::view_state::{transition_progress, ExpansionSet, ViewMode, Zoom};

/// The embedded hierarchy, parsed once at startup and provided via context
#[derive(Clone, Copy)]
pub struct Hierarchy(StoredValue<Option<PositionNode>>);

impl Hierarchy {
    pub fn load() -> Self {
        let root = match org_chart() {
            Ok(root) => {
                web_sys::console::log_1(&format!("[ORG] Loaded hierarchy rooted at {}", root.id).into());
                Some(root)
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[ORG] {}", e).into());
                None
            }
        };
        Self(StoredValue::new(root))
    }

    pub fn root(&self) -> Option<PositionNode> {
        self.0.get_value()
    }

    pub fn with<R>(&self, f: impl FnOnce(Option<&PositionNode>) -> R) -> R {
        self.0.with_value(|root| f(root.as_ref()))
    }
}

pub fn use_hierarchy() -> Hierarchy {
    expect_context::<Hierarchy>()
}

#[derive(Clone, Copy)]
pub struct OrgChartState {
    pub root: StoredValue<PositionNode>,
    pub view_mode: RwSignal<ViewMode>,
    pub zoom: RwSignal<Zoom>,
    pub expanded: RwSignal<ExpansionSet>,
    /// Node the breadcrumb points at
    pub focused: RwSignal<Option<String>>,
    /// Progress percent while a view switch is running
    pub transition: RwSignal<Option<u32>>,
}

impl OrgChartState {
    pub fn new(root: PositionNode) -> Self {
        let expanded = ExpansionSet::with_root(&root);
        let focused = Some(root.id.clone());
        Self {
            root: StoredValue::new(root),
            view_mode: RwSignal::new(ViewMode::default()),
            zoom: RwSignal::new(Zoom::default()),
            expanded: RwSignal::new(expanded),
            focused: RwSignal::new(focused),
            transition: RwSignal::new(None),
        }
    }

    pub fn zoom_in(&self) {
        self.zoom.update(|z| *z = z.zoom_in());
    }

    pub fn zoom_out(&self) {
        self.zoom.update(|z| *z = z.zoom_out());
    }

    pub fn reset_zoom(&self) {
        self.zoom.set(Zoom::default());
    }

    pub fn toggle_node(&self, id: &str) {
        self.expanded.update(|set| set.toggle(id));
    }

    pub fn expand_all(&self) {
        self.root.with_value(|root| self.expanded.update(|set| set.expand_all(root)));
    }

    pub fn collapse_all(&self) {
        self.expanded.update(ExpansionSet::collapse_all);
    }

    /// Point the breadcrumb at `id` and open its ancestors
    pub fn focus(&self, id: &str) -> bool {
        let found = self.root.with_value(|root| {
            let mut found = false;
            self.expanded.update(|set| found = set.expand_path(root, id));
            found
        });
        if found {
            web_sys::console::log_1(&format!("[ORG] focus {}", id).into());
            self.focused.set(Some(id.to_string()));
        } else {
            web_sys::console::error_1(&format!("[ORG] unknown position {}", id).into());
        }
        found
    }

    /// Tracked breadcrumb path for the focused node
    pub fn breadcrumb(&self) -> Vec<BreadcrumbItem> {
        let focused = self.focused.get();
        self.root.with_value(|root| {
            focused
                .and_then(|id| breadcrumb(root, &id))
                .unwrap_or_else(|| vec![BreadcrumbItem::from(root)])
        })
    }

    /// Tracked rows currently visible in the tree
    pub fn visible_rows(&self) -> Vec<GridRow> {
        self.expanded.with(|set| self.root.with_value(|root| visible_rows(root, set.ids())))
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.with(Option::is_some)
    }

    /// Switch tree/grid after the cosmetic progress indicator completes.
    /// Ignored while a switch is already running.
    pub fn toggle_view(&self, config: &AppConfig) {
        if self.transition.get_untracked().is_some() {
            return;
        }
        let steps = config.transition_steps;
        let tick = config.transition_tick_ms();
        let state = *self;
        state.transition.set(Some(0));

        spawn_local(async move {
            for step in 1..=steps {
                TimeoutFuture::new(tick).await;
                // Page may have been left mid-transition
                if state.transition.try_set(Some(transition_progress(step, steps))).is_some() {
                    return;
                }
            }
            if let Some(mode) = state.view_mode.try_update(|mode| {
                *mode = mode.toggled();
                *mode
            }) {
                state.transition.set(None);
                web_sys::console::log_1(&format!("[ORG] view -> {:?}", mode).into());
            }
        });
    }
}
