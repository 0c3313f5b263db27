//! HRMS Exit Management Server
//!
//! # Module structure
//!
//! ```text
//! exit-server/src/
//! ├── core/    # configuration, state, HTTP server
//! ├── auth/    # gateway-asserted actor identity
//! ├── api/     # HTTP routes and handlers
//! ├── exit/    # workflow engine, policies, completion hook
//! ├── db/      # pool, migrations, repositories
//! └── utils/   # errors, logging, time helpers
//! ```
//!
//! The resignation case is the aggregate root; all mutations flow
//! through [`exit::ExitWorkflowEngine`], which enforces the state
//! machine and writes the append-only history log.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod exit;
pub mod utils;

// Re-export public types
pub use auth::CurrentActor;
pub use core::{Config, Server, ServerState};
pub use exit::{ExitWorkflowEngine, WorkflowCtx};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging; call once at startup
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let level = std::env::var("LOG_LEVEL").ok();
    let dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), dir.as_deref());
}
