pub mod config;
pub mod error;

pub use config::CudynConfig;
pub use error::CoreError;
