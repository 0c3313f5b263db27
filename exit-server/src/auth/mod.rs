//! Actor Identity
//!
//! Session issuance is owned by the upstream auth gateway; this service
//! consumes the identity the gateway asserts per request and stamps it
//! onto every write (created_by / modified_by).

pub mod middleware;

pub use middleware::{require_identity, CurrentActor, ACTOR_HEADER};
