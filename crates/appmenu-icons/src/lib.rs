//! appmenu-icons: Themed icon lookup for Linux launchers.
//!
//! Implements the freedesktop icon-theme lookup used by the launcher:
//! - Search-root resolution from XDG environment variables
//! - Lazy per-theme indexing of size-specific icon folders
//! - Best-size selection with a hicolor and pixmap fallback chain

mod icons;
mod paths;
mod theme;

pub use icons::{FALLBACK_THEME, Icons, score};
pub use paths::icon_roots;
pub use theme::{Icon, IconTheme};
