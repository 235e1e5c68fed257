//! Property-based tests for CaseWorkflowService.
//!
//! Random sequences of case actions by random roles:
//! - every status change is a valid case transition
//! - High and Critical cases are never approved without a GM sign-off
//! - the activity log only grows

use proptest::prelude::*;
use uuid::Uuid;

use kyc_shared::types::{CaseId, UserId};

use crate::case::{Case, EntityData, RiskLevel};
use crate::workflow::case_flow::CaseWorkflowService;
use crate::workflow::types::{CaseStatus, UserRole};

#[derive(Debug, Clone, Copy)]
enum CaseAction {
    Submit,
    Approve,
    Reject,
}

fn arb_action() -> impl Strategy<Value = (CaseAction, UserRole)> {
    let action = prop_oneof![
        Just(CaseAction::Submit),
        Just(CaseAction::Approve),
        Just(CaseAction::Reject),
    ];
    let role = prop_oneof![
        Just(UserRole::Rm),
        Just(UserRole::Checker),
        Just(UserRole::Compliance),
        Just(UserRole::Gm),
    ];
    (action, role)
}

fn arb_risk() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Low),
        Just(RiskLevel::Medium),
        Just(RiskLevel::High),
        Just(RiskLevel::Critical),
    ]
}

fn new_case(risk: RiskLevel) -> Case {
    Case::new(
        CaseId::from_uuid(Uuid::from_u128(1)),
        EntityData {
            entity_name: "Prop Entity".to_string(),
            entity_type: "Partnership".to_string(),
            tax_id: None,
            registered_address: None,
        },
        risk,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_case_pipeline_invariants(
        risk in arb_risk(),
        actions in prop::collection::vec(arb_action(), 1..25),
    ) {
        let mut case = new_case(risk);
        let user = UserId::from_uuid(Uuid::from_u128(7));

        for (action, role) in actions {
            let before = case.status;
            let activities_before = case.activities.len();

            let result = match action {
                // An empty checklist always passes the gate.
                CaseAction::Submit => CaseWorkflowService::submit_case(&mut case, &[], user, role),
                CaseAction::Approve => CaseWorkflowService::approve_case(&mut case, user, role, None),
                CaseAction::Reject => {
                    CaseWorkflowService::reject_case(&mut case, user, role, "Incomplete".to_string())
                }
            };

            match result {
                Ok(after) => {
                    prop_assert_eq!(after, case.status);
                    prop_assert!(CaseWorkflowService::is_valid_case_transition(before, after, risk));
                    prop_assert_eq!(case.activities.len(), activities_before + 1);
                }
                Err(_) => {
                    prop_assert_eq!(case.status, before);
                    prop_assert_eq!(case.activities.len(), activities_before);
                }
            }

            if case.status == CaseStatus::Approved {
                let snapshot = case.kyc_approval_snapshot.as_ref().unwrap();
                let gm_signed = snapshot.approvals.iter().any(|a| a.role == UserRole::Gm);
                prop_assert_eq!(gm_signed, risk.requires_gm_approval());
                prop_assert!(snapshot.approvals.iter().any(|a| a.role == UserRole::Compliance));
            }
        }
    }
}
