//! Terminal UI for virtdash.
//!
//! A three-panel table dashboard: virtual machines on the left, networks
//! and storage pools stacked on the right, a key legend on the last row.
//! Panels are laid out from the live terminal size and the longest names
//! on every frame.
//!
//! ## Hotkeys
//!
//! - `Tab` - Next panel
//! - `Up`/`Down` - Move the cursor
//! - `F1` - Start the selected resource
//! - `F2` - Stop the selected resource
//! - `F10` or `Ctrl+C` - Quit

pub mod app;
pub mod event;
pub mod layout;
pub mod panel;
pub mod selection;
pub mod theme;


pub use app::{App, DEFAULT_POLL_INTERVAL};
pub use event::{AppEvent, InputHandler};
pub use selection::{Selection, Transition};
