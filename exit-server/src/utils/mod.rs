//! Utility Module
//!
//! Error types, result aliases, logging and time helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::AppError;
pub use result::AppResult;
