pub mod config;
pub mod error;

pub use config::TesauroConfig;
pub use error::{Result, TesauroError};
