//! Workflow error types for document review and case approval.

use thiserror::Error;

use kyc_shared::types::{AccountId, SubmissionId};

use crate::checklist::RequirementId;
use crate::workflow::types::{AccountStatus, CaseStatus, DocumentStatus, UserRole};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid document status transition.
    #[error("Invalid document status transition from {from} to {to}")]
    InvalidDocumentTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },

    /// Attempted an invalid case status transition.
    #[error("Invalid case status transition from {from} to {to}")]
    InvalidCaseTransition {
        /// The current status.
        from: CaseStatus,
        /// The attempted target status.
        to: CaseStatus,
    },

    /// Attempted an invalid account status transition.
    #[error("Invalid account status transition from {from} to {to}")]
    InvalidAccountTransition {
        /// The current status.
        from: AccountStatus,
        /// The attempted target status.
        to: AccountStatus,
    },

    /// The role may not perform this action at all.
    #[error("Role {role} is not permitted to {action}")]
    RoleNotPermitted {
        /// The acting role.
        role: UserRole,
        /// The attempted action.
        action: &'static str,
    },

    /// Mandatory checklist items are still outstanding.
    #[error("{outstanding} mandatory checklist item(s) are missing, rejected or expired")]
    ChecklistIncomplete {
        /// Number of blocking items.
        outstanding: usize,
    },

    /// The checklist passed in has no forms section for the account.
    #[error("Checklist has no account forms section for account {0}")]
    AccountChecklistMissing(AccountId),

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Comment text is required but not provided.
    #[error("Comment text is required")]
    CommentRequired,

    /// No submission history exists for the requirement.
    #[error("No submissions recorded for requirement {0}")]
    RequirementNotFound(RequirementId),

    /// Submission not found under the requirement.
    #[error("Submission {0} not found")]
    SubmissionNotFound(SubmissionId),

    /// The submission has been superseded by a newer one.
    #[error("Submission {0} has been superseded and can no longer be reviewed")]
    StaleSubmission(SubmissionId),

    /// Account not found on the case.
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidDocumentTransition { .. }
            | Self::InvalidCaseTransition { .. }
            | Self::InvalidAccountTransition { .. }
            | Self::RejectionReasonRequired
            | Self::CommentRequired => 400,

            Self::RoleNotPermitted { .. } => 403,

            Self::RequirementNotFound(_)
            | Self::SubmissionNotFound(_)
            | Self::AccountNotFound(_) => 404,

            Self::StaleSubmission(_) => 409,

            Self::ChecklistIncomplete { .. } | Self::AccountChecklistMissing(_) => 422,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDocumentTransition { .. }
            | Self::InvalidCaseTransition { .. }
            | Self::InvalidAccountTransition { .. } => "INVALID_TRANSITION",
            Self::RoleNotPermitted { .. } => "ROLE_NOT_PERMITTED",
            Self::ChecklistIncomplete { .. } => "CHECKLIST_INCOMPLETE",
            Self::AccountChecklistMissing(_) => "ACCOUNT_CHECKLIST_MISSING",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::CommentRequired => "COMMENT_REQUIRED",
            Self::RequirementNotFound(_) => "REQUIREMENT_NOT_FOUND",
            Self::SubmissionNotFound(_) => "SUBMISSION_NOT_FOUND",
            Self::StaleSubmission(_) => "STALE_SUBMISSION",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
        }
    }
}

impl From<WorkflowError> for kyc_shared::AppError {
    fn from(err: WorkflowError) -> Self {
        Self::from_status(err.status_code(), err.to_string())
    }
}
