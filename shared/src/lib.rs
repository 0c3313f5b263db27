//! Shared types for the HRMS exit-management service
//!
//! Common types used across crates: the uniform response envelope,
//! error-code table, domain models, and small utilities.

pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use error::ApiErrorCode;
pub use response::{ApiResponse, PaginatedResponse, Pagination};
pub use serde::{Deserialize, Serialize};
