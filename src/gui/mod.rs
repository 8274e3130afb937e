//! GUI module - User interface components

mod app;
mod dashboard;
mod sidebar;

pub use app::PayoutsApp;
pub use dashboard::DashboardView;
pub use sidebar::{Sidebar, SidebarAction};
