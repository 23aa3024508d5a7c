//! Overlay modules for the shell.
//!
//! Overlays sit above the mounted view and, while open, take over keyboard
//! input. Their visibility lives in `NavState` / `ViewState` flags; this
//! module only knows how to draw them.
//!
//! ## Module Structure
//!
//! - `info.rs`: informational overlays (`InfoTopic`)
//! - `logout.rs`: logout confirmation modal
//! - `result.rs`: scan result panel
//! - `toast.rs`: welcome toast and notices
//! - `render_utils.rs`: shared rendering utilities for overlays

pub mod info;
pub mod logout;
pub mod render_utils;
pub mod result;
pub mod toast;

pub use info::{InfoTopic, render_info};
pub use logout::render_logout;
pub use result::render_result;
pub use toast::{render_notice, render_welcome};

/// Which overlay owns the keyboard, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveOverlay {
    Logout,
    Info(InfoTopic),
    Result,
}
