//! User interface chrome for the earthquake dashboard
//!
//! Theme, the filter/overlay control panel and the menu and status bars.
//! The dockable panels themselves live in `qd-views`.

pub mod control_panel;
pub mod shell;
pub mod theme;

pub use control_panel::ControlPanel;
pub use shell::{menu_bar, status_bar, MenuAction, StatusLine};
pub use theme::{apply_theme, Theme};
