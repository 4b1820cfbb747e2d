//! RunInsight Core — shared categories, configuration, and error types.

pub mod category;
pub mod config;
pub mod error;

pub use category::CategoryKey;
pub use config::{DataPaths, ServiceConfig};
pub use error::{Error, Result};
