//! Core ImagingIQ library (session capability, config, errors, logging).

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod validation;
