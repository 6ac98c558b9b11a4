// Engine library root
pub mod config;
pub mod data;
pub mod error;
pub mod services;
pub mod transform;

pub use error::{EngineError, Result};
