//! Document review state machine.
//!
//! Validates a single document action against the current status and the
//! acting role and returns the resulting `DocumentAction`. Nothing here
//! touches a case; see `ledger` for applying actions.

use chrono::Utc;

use kyc_shared::types::UserId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{DocumentAction, DocumentStatus, UserRole};

/// Stateless service for document status transitions.
pub struct DocumentWorkflowService;

impl DocumentWorkflowService {
    /// Attach a new submission to a requirement.
    ///
    /// Only the RM submits. The requirement may be missing, rejected,
    /// expired, or already pending (an updated version). A verified,
    /// unexpired document cannot be replaced.
    pub fn submit(
        current_status: DocumentStatus,
        role: UserRole,
        submitted_by: UserId,
    ) -> Result<DocumentAction, WorkflowError> {
        if role != UserRole::Rm {
            return Err(WorkflowError::RoleNotPermitted {
                role,
                action: "submit documents",
            });
        }

        if !current_status.accepts_new_submission() {
            return Err(WorkflowError::InvalidDocumentTransition {
                from: current_status,
                to: DocumentStatus::PendingCheckerVerification,
            });
        }

        Ok(DocumentAction::Submit {
            new_status: DocumentStatus::PendingCheckerVerification,
            submitted_by,
            submitted_at: Utc::now(),
        })
    }

    /// Move a submission to the next review stage.
    ///
    /// Checker: Pending Checker → Pending Compliance.
    /// Compliance: Pending Compliance → Verified.
    pub fn approve(
        current_status: DocumentStatus,
        role: UserRole,
        approved_by: UserId,
        notes: Option<String>,
    ) -> Result<DocumentAction, WorkflowError> {
        let (expected, target) = Self::review_stage(role, "approve documents")?;

        if current_status != expected {
            return Err(WorkflowError::InvalidDocumentTransition {
                from: current_status,
                to: target,
            });
        }

        Ok(DocumentAction::Approve {
            from: current_status,
            new_status: target,
            approved_by,
            role,
            approved_at: Utc::now(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Send a submission back to the RM.
    ///
    /// Each reviewer can only reject at its own stage.
    pub fn reject(
        current_status: DocumentStatus,
        role: UserRole,
        rejected_by: UserId,
        reason: String,
    ) -> Result<DocumentAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        let (expected, _) = Self::review_stage(role, "reject documents")?;

        if current_status != expected {
            return Err(WorkflowError::InvalidDocumentTransition {
                from: current_status,
                to: DocumentStatus::Rejected,
            });
        }

        Ok(DocumentAction::Reject {
            from: current_status,
            new_status: DocumentStatus::Rejected,
            rejected_by,
            role,
            rejected_at: Utc::now(),
            reason,
        })
    }

    /// Append a remark without changing the status.
    pub fn comment(
        current_status: DocumentStatus,
        role: UserRole,
        author: UserId,
        text: String,
    ) -> Result<DocumentAction, WorkflowError> {
        if text.trim().is_empty() {
            return Err(WorkflowError::CommentRequired);
        }

        Ok(DocumentAction::Comment {
            status: current_status,
            author,
            role,
            at: Utc::now(),
            text,
        })
    }

    /// Check if a stored document status transition is valid.
    ///
    /// Re-submission targets `Pending Checker Verification` from any state
    /// that accepts a new submission. Review transitions never skip a stage.
    #[must_use]
    pub fn is_valid_transition(from: DocumentStatus, to: DocumentStatus) -> bool {
        use DocumentStatus::{
            PendingCheckerVerification as Checker, PendingComplianceVerification as Compliance,
            Rejected, Verified,
        };

        match (from, to) {
            (from, Checker) => from.accepts_new_submission(),
            (Checker, Compliance | Rejected) | (Compliance, Verified | Rejected) => true,
            _ => false,
        }
    }

    /// The status a reviewer acts on and the status approval moves it to.
    fn review_stage(
        role: UserRole,
        action: &'static str,
    ) -> Result<(DocumentStatus, DocumentStatus), WorkflowError> {
        match role {
            UserRole::Checker => Ok((
                DocumentStatus::PendingCheckerVerification,
                DocumentStatus::PendingComplianceVerification,
            )),
            UserRole::Compliance => Ok((
                DocumentStatus::PendingComplianceVerification,
                DocumentStatus::Verified,
            )),
            UserRole::Rm | UserRole::Gm => Err(WorkflowError::RoleNotPermitted { role, action }),
        }
    }
}
