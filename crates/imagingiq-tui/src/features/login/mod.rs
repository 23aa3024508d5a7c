//! Sign-in form.

mod render;
mod state;
mod update;

pub use render::render_login;
pub use state::{LoginField, LoginForm};
pub use update::{LOGIN_SUCCEEDED, apply_input, handle_sign_in_finished, submit};
