//! Shared helpers for the cudyn crates: logging setup and platform constants.

mod logging;
pub mod platform;

pub use logging::{init_logging, init_logging_with, LOG_ENV};
