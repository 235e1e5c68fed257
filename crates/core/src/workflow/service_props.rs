//! Property-based tests for DocumentWorkflowService.
//!
//! - Only the RM submits, and only over a status that accepts a submission
//! - Reviews never skip a stage
//! - Every successful action is a valid stored transition
//! - Comments never change status

use proptest::prelude::*;
use uuid::Uuid;

use kyc_shared::types::UserId;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::DocumentWorkflowService;
use crate::workflow::types::{DocumentAction, DocumentStatus, UserRole};

/// Strategy for generating random DocumentStatus values.
fn arb_status() -> impl Strategy<Value = DocumentStatus> {
    prop::sample::select(DocumentStatus::ALL.to_vec())
}

/// Strategy for generating random roles.
fn arb_role() -> impl Strategy<Value = UserRole> {
    prop_oneof![
        Just(UserRole::Rm),
        Just(UserRole::Checker),
        Just(UserRole::Compliance),
        Just(UserRole::Gm),
    ]
}

/// Strategy for generating random user ids.
fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating non-empty strings (for reasons and comments).
fn arb_non_empty_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,99}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Submit succeeds iff the RM acts on a status that accepts a submission.
    #[test]
    fn prop_submit_rules(status in arb_status(), role in arb_role(), user in arb_user()) {
        let result = DocumentWorkflowService::submit(status, role, user);
        let allowed = role == UserRole::Rm && status.accepts_new_submission();
        prop_assert_eq!(result.is_ok(), allowed);

        if let Ok(DocumentAction::Submit { submitted_by, new_status, .. }) = result {
            prop_assert_eq!(submitted_by, user);
            prop_assert_eq!(new_status, DocumentStatus::PendingCheckerVerification);
            prop_assert!(DocumentWorkflowService::is_valid_transition(status, new_status));
        }
    }

    /// Approval moves exactly one stage, and only for the stage's reviewer.
    #[test]
    fn prop_approve_never_skips(status in arb_status(), role in arb_role(), user in arb_user()) {
        let result = DocumentWorkflowService::approve(status, role, user, None);
        match (status, role) {
            (DocumentStatus::PendingCheckerVerification, UserRole::Checker) => {
                prop_assert_eq!(
                    result.unwrap().new_status(),
                    DocumentStatus::PendingComplianceVerification
                );
            }
            (DocumentStatus::PendingComplianceVerification, UserRole::Compliance) => {
                prop_assert_eq!(result.unwrap().new_status(), DocumentStatus::Verified);
            }
            (_, UserRole::Rm | UserRole::Gm) => {
                let is_role_error = matches!(result, Err(WorkflowError::RoleNotPermitted { .. }));
                prop_assert!(is_role_error);
            }
            _ => {
                let is_transition_error = matches!(result, Err(WorkflowError::InvalidDocumentTransition { .. }));
                prop_assert!(is_transition_error);
            }
        }
    }

    /// Successful approvals and rejections are valid stored transitions.
    #[test]
    fn prop_review_results_are_valid_transitions(
        status in arb_status(),
        role in arb_role(),
        user in arb_user(),
        reason in arb_non_empty_string(),
    ) {
        if let Ok(action) = DocumentWorkflowService::approve(status, role, user, None) {
            prop_assert!(DocumentWorkflowService::is_valid_transition(status, action.new_status()));
        }
        if let Ok(action) = DocumentWorkflowService::reject(status, role, user, reason.clone()) {
            prop_assert_eq!(action.new_status(), DocumentStatus::Rejected);
            prop_assert!(DocumentWorkflowService::is_valid_transition(status, action.new_status()));
            prop_assert_eq!(action.remark(), Some(reason.as_str()));
        }
    }

    /// Blank rejection reasons are refused regardless of status or role.
    #[test]
    fn prop_reject_requires_reason(
        status in arb_status(),
        role in arb_role(),
        user in arb_user(),
        blank in "[ \t]{0,5}",
    ) {
        let result = DocumentWorkflowService::reject(status, role, user, blank);
        let is_reason_error = matches!(result, Err(WorkflowError::RejectionReasonRequired));
        prop_assert!(is_reason_error);
    }

    /// Comments are accepted from every role and leave the status alone.
    #[test]
    fn prop_comment_keeps_status(
        status in arb_status(),
        role in arb_role(),
        user in arb_user(),
        text in arb_non_empty_string(),
    ) {
        let action = DocumentWorkflowService::comment(status, role, user, text).unwrap();
        prop_assert_eq!(action.new_status(), status);
    }

    /// Nothing leaves Verified except through expiry, which is never stored.
    #[test]
    fn prop_verified_is_stable(to in arb_status()) {
        prop_assert!(!DocumentWorkflowService::is_valid_transition(DocumentStatus::Verified, to));
    }
}
