//! UI Components
//!
//! Leptos components for the shell, CRUD screens and the org chart.

mod breadcrumb_bar;
mod chart_toolbar;
mod command_palette;
mod crud_page;
mod dashboard;
mod delete_confirm_button;
mod grid_view;
mod login_page;
mod modal;
mod nav_sidebar;
mod node_detail;
mod notice_banner;
mod org_chart_page;
mod record_form;
mod shortcut_help;
mod store_sync;
mod tree_view;

pub use breadcrumb_bar::BreadcrumbBar;
pub use chart_toolbar::ChartToolbar;
pub use command_palette::CommandPalette;
pub use crud_page::crud_page;
pub use dashboard::Dashboard;
pub use delete_confirm_button::DeleteConfirmButton;
pub use grid_view::GridView;
pub use login_page::LoginPage;
pub use modal::Modal;
pub use nav_sidebar::NavSidebar;
pub use node_detail::NodeDetail;
pub use notice_banner::NoticeBanner;
pub use org_chart_page::OrgChartPage;
pub use record_form::RecordForm;
pub use shortcut_help::ShortcutHelp;
pub use store_sync::StoreSync;
pub use tree_view::TreeView;
