//! appmenu-apps: Desktop entry catalog for Linux launchers.
//!
//! Provides:
//! - Search-root resolution from XDG environment variables
//! - .desktop file parsing into structured entries
//! - A deduplicated, name-sorted catalog of launchable applications

mod catalog;
mod desktop_entry;
mod paths;

pub use catalog::Catalog;
pub use desktop_entry::{DesktopEntry, path_to_id};
pub use paths::entry_roots;
