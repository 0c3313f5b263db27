//! Domain models for exit management
//!
//! Entities, request payloads and status enums. Database derives are
//! gated behind the `db` feature so client-side consumers stay light.

pub mod clearance;
pub mod employee;
pub mod resignation;

pub use clearance::{
    AssetCondition, Clearance, ClearanceDepartment, ClearanceDetails, ClearanceUpsert,
};
pub use employee::{Employee, EmployeeRef};
pub use resignation::{
    ActiveCaseCheck, EarlyReleaseApprove, EarlyReleaseReject, EarlyReleaseRequest,
    EarlyReleaseStatus, LastWorkingDayUpdate, RejectRequest, RejectionType, Resignation,
    ResignationDetail, ResignationFilter, ResignationHistoryEntry, ResignationStatus,
    ResignationSubmit,
};
