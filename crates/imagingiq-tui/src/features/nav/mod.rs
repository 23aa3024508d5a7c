//! Navigation chrome.
//!
//! Shell-level state that survives view mounts: the signed-in user badge,
//! the logout confirmation, informational overlays and notices.

mod render;
mod state;
mod update;

pub use render::render_header;
pub use state::{NavState, Notice, NoticeLevel};
pub use update::{
    SIGN_OUT_FAILED, cancel_logout, close_info, confirm_logout, dismiss_notice,
    handle_notice_timer, handle_sign_out_finished, open_info, request_logout, session_changed,
    show_notice,
};
