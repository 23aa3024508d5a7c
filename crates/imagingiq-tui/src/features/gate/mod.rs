//! Session gate feature.
//!
//! Decides, once per protected-view mount, whether the view may render.

mod state;
mod update;

pub use state::SessionState;
pub use update::{handle_session_resolved, mount};
