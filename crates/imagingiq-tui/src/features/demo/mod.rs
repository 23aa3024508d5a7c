//! Demo-request form on the home view.

mod render;
mod state;
mod update;

pub use render::render_demo_request;
pub use state::DemoRequestForm;
pub use update::{apply_input, blur, focus, handle_demo_timer, reset, submit};
