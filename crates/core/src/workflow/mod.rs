//! Document review and case approval workflow.
//!
//! This module implements the document status state machine, the ledger
//! that records submissions and reviews on a case, and the case and
//! account approval pipelines.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (DocumentStatus, UserRole, CaseStatus)
//! - `error` - Workflow-specific error types
//! - `service` - Document status transition logic
//! - `ledger` - Appends submissions, reviews and comments to a case
//! - `case_flow` - Case and account approval pipelines

pub mod case_flow;
pub mod error;
pub mod ledger;
pub mod service;
pub mod types;

#[cfg(test)]
mod case_flow_props;
#[cfg(test)]
mod service_props;

pub use case_flow::CaseWorkflowService;
pub use error::WorkflowError;
pub use ledger::{NewSubmission, ReviewDecision, SubmissionLedger};
pub use service::DocumentWorkflowService;
pub use types::{AccountStatus, CaseStatus, DocumentAction, DocumentStatus, UserRole};
