//! Exit Management
//!
//! The resignation workflow core: state machine engine, collaborator
//! policies and the auto-completion hook.

pub mod completion;
pub mod engine;
pub mod policy;

pub use completion::{CompletionHook, LogCompletionHook};
pub use engine::{ExitWorkflowEngine, WorkflowCtx};
pub use policy::{
    EarlyReleasePolicy, EmployeeDirectory, NoticePolicy, NoticeWindowPolicy, SqlEmployeeDirectory,
    TenureNoticePolicy,
};
