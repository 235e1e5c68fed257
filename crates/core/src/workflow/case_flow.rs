//! Case and account approval pipelines.
//!
//! A case moves RM → Checker → Compliance, with a final GM step for High
//! and Critical risk. Accounts run their own RM → Checker → Compliance
//! pipeline gated by their own forms section. Both gates are evaluated on a
//! freshly generated checklist passed in by the caller.

use chrono::{DateTime, Utc};
use tracing::info;

use kyc_shared::types::{AccountId, UserId};

use crate::case::{Activity, ApprovalSnapshot, Case, RiskLevel, StageApproval};
use crate::checklist::ChecklistSection;
use crate::progress::ProgressCalculator;
use crate::workflow::error::WorkflowError;
use crate::workflow::types::{AccountStatus, CaseStatus, UserRole};

/// Activity recorded when the RM submits the case for review.
pub const CASE_SUBMITTED: &str = "CASE_SUBMITTED";
/// Activity recorded for each case approval stage.
pub const CASE_APPROVED: &str = "CASE_APPROVED";
/// Activity recorded when a reviewer rejects the case.
pub const CASE_REJECTED: &str = "CASE_REJECTED";
/// Activity recorded when the RM submits an account for review.
pub const ACCOUNT_SUBMITTED: &str = "ACCOUNT_SUBMITTED";
/// Activity recorded for each account approval stage.
pub const ACCOUNT_APPROVED: &str = "ACCOUNT_APPROVED";
/// Activity recorded when a reviewer rejects an account.
pub const ACCOUNT_REJECTED: &str = "ACCOUNT_REJECTED";

/// Stateless service for case and account status transitions.
pub struct CaseWorkflowService;

impl CaseWorkflowService {
    /// Submit the case for checker review.
    ///
    /// Allowed from Draft or Rejected, by the RM, once every required item
    /// in the main checklist is pending or verified.
    pub fn submit_case(
        case: &mut Case,
        sections: &[ChecklistSection],
        actor: UserId,
        role: UserRole,
    ) -> Result<CaseStatus, WorkflowError> {
        if role != UserRole::Rm {
            return Err(WorkflowError::RoleNotPermitted {
                role,
                action: "submit cases",
            });
        }

        if !matches!(case.status, CaseStatus::Draft | CaseStatus::Rejected) {
            return Err(WorkflowError::InvalidCaseTransition {
                from: case.status,
                to: CaseStatus::PendingChecker,
            });
        }

        let outstanding = ProgressCalculator::outstanding_required(sections).len();
        if outstanding > 0 {
            return Err(WorkflowError::ChecklistIncomplete { outstanding });
        }

        let from = case.status;
        case.status = CaseStatus::PendingChecker;
        case.kyc_approval_snapshot = None;
        case.record_activity(actor, role, CASE_SUBMITTED, None, Utc::now());

        info!(case_id = %case.case_id, %from, "case submitted for review");
        Ok(case.status)
    }

    /// Approve the case at the current stage.
    ///
    /// Compliance approval is final for Low and Medium risk; High and
    /// Critical go on to the GM. The final approval freezes a
    /// `kyc_approval_snapshot`.
    pub fn approve_case(
        case: &mut Case,
        actor: UserId,
        role: UserRole,
        notes: Option<String>,
    ) -> Result<CaseStatus, WorkflowError> {
        Self::ensure_case_reviewer(case.status, role, CaseStatus::Approved, "approve cases")?;

        let from = case.status;
        let to = match from {
            CaseStatus::PendingChecker => CaseStatus::PendingCompliance,
            CaseStatus::PendingCompliance if case.risk_level.requires_gm_approval() => {
                CaseStatus::PendingGm
            }
            _ => CaseStatus::Approved,
        };

        let now = Utc::now();
        case.status = to;
        case.record_activity(
            actor,
            role,
            CASE_APPROVED,
            Some(stage_details(from, to, notes)),
            now,
        );

        if to == CaseStatus::Approved {
            let approvals = approvals_since(&case.activities, CASE_SUBMITTED, CASE_APPROVED, None);
            case.kyc_approval_snapshot = Some(snapshot(actor, now, case.risk_level, approvals));
        }

        info!(case_id = %case.case_id, %from, %to, %role, "case approved");
        Ok(to)
    }

    /// Send the case back to the RM from any pending stage.
    pub fn reject_case(
        case: &mut Case,
        actor: UserId,
        role: UserRole,
        reason: String,
    ) -> Result<CaseStatus, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }
        Self::ensure_case_reviewer(case.status, role, CaseStatus::Rejected, "reject cases")?;

        let from = case.status;
        case.status = CaseStatus::Rejected;
        case.record_activity(actor, role, CASE_REJECTED, Some(reason), Utc::now());

        info!(case_id = %case.case_id, %from, %role, "case rejected");
        Ok(case.status)
    }

    /// Submit an account for checker review.
    ///
    /// Gated by the account's own forms section only. A checklist without
    /// that section is refused rather than treated as complete.
    pub fn submit_account(
        case: &mut Case,
        sections: &[ChecklistSection],
        account_id: AccountId,
        actor: UserId,
        role: UserRole,
    ) -> Result<AccountStatus, WorkflowError> {
        if role != UserRole::Rm {
            return Err(WorkflowError::RoleNotPermitted {
                role,
                action: "submit accounts",
            });
        }

        let from = case
            .account(account_id)
            .ok_or(WorkflowError::AccountNotFound(account_id))?
            .status;
        if !matches!(from, AccountStatus::Proposed | AccountStatus::Rejected) {
            return Err(WorkflowError::InvalidAccountTransition {
                from,
                to: AccountStatus::PendingChecker,
            });
        }

        let section = ProgressCalculator::account_section(sections, account_id)
            .ok_or(WorkflowError::AccountChecklistMissing(account_id))?;
        let outstanding = section.items.iter().filter(|i| i.is_blocking()).count();
        if outstanding > 0 {
            return Err(WorkflowError::ChecklistIncomplete { outstanding });
        }

        Self::set_account_status(case, account_id, AccountStatus::PendingChecker, None)?;
        case.record_account_activity(
            account_id,
            actor,
            role,
            ACCOUNT_SUBMITTED,
            Some(format!("{from} -> {}", AccountStatus::PendingChecker)),
            Utc::now(),
        );

        info!(case_id = %case.case_id, account_id = %account_id, %from, "account submitted");
        Ok(AccountStatus::PendingChecker)
    }

    /// Approve an account at the current stage. Compliance approval opens it.
    pub fn approve_account(
        case: &mut Case,
        account_id: AccountId,
        actor: UserId,
        role: UserRole,
    ) -> Result<AccountStatus, WorkflowError> {
        let from = case
            .account(account_id)
            .ok_or(WorkflowError::AccountNotFound(account_id))?
            .status;

        let to = match (from, role) {
            (AccountStatus::PendingChecker, UserRole::Checker) => AccountStatus::PendingCompliance,
            (AccountStatus::PendingCompliance, UserRole::Compliance) => AccountStatus::Opened,
            (_, UserRole::Rm | UserRole::Gm) => {
                return Err(WorkflowError::RoleNotPermitted {
                    role,
                    action: "approve accounts",
                });
            }
            _ => {
                return Err(WorkflowError::InvalidAccountTransition {
                    from,
                    to: AccountStatus::Opened,
                });
            }
        };

        let now = Utc::now();
        case.record_account_activity(
            account_id,
            actor,
            role,
            ACCOUNT_APPROVED,
            Some(format!("{from} -> {to}")),
            now,
        );

        let snapshot = (to == AccountStatus::Opened).then(|| {
            let approvals = approvals_since(
                &case.activities,
                ACCOUNT_SUBMITTED,
                ACCOUNT_APPROVED,
                Some(account_id),
            );
            snapshot(actor, now, case.risk_level, approvals)
        });
        Self::set_account_status(case, account_id, to, snapshot)?;

        info!(case_id = %case.case_id, account_id = %account_id, %from, %to, "account approved");
        Ok(to)
    }

    /// Send an account back to the RM from either pending stage.
    pub fn reject_account(
        case: &mut Case,
        account_id: AccountId,
        actor: UserId,
        role: UserRole,
        reason: String,
    ) -> Result<AccountStatus, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        let from = case
            .account(account_id)
            .ok_or(WorkflowError::AccountNotFound(account_id))?
            .status;

        match (from, role) {
            (AccountStatus::PendingChecker, UserRole::Checker)
            | (AccountStatus::PendingCompliance, UserRole::Compliance) => {}
            (_, UserRole::Rm | UserRole::Gm) => {
                return Err(WorkflowError::RoleNotPermitted {
                    role,
                    action: "reject accounts",
                });
            }
            _ => {
                return Err(WorkflowError::InvalidAccountTransition {
                    from,
                    to: AccountStatus::Rejected,
                });
            }
        }

        Self::set_account_status(case, account_id, AccountStatus::Rejected, None)?;
        case.record_account_activity(
            account_id,
            actor,
            role,
            ACCOUNT_REJECTED,
            Some(reason),
            Utc::now(),
        );

        info!(case_id = %case.case_id, account_id = %account_id, %from, %role, "account rejected");
        Ok(AccountStatus::Rejected)
    }

    /// Check if a case status transition is valid.
    #[must_use]
    pub fn is_valid_case_transition(from: CaseStatus, to: CaseStatus, risk: RiskLevel) -> bool {
        use CaseStatus::{Approved, Draft, PendingChecker, PendingCompliance, PendingGm, Rejected};

        match (from, to) {
            (Draft | Rejected, PendingChecker)
            | (PendingChecker, PendingCompliance)
            | (PendingGm, Approved)
            | (PendingChecker | PendingCompliance | PendingGm, Rejected) => true,
            (PendingCompliance, PendingGm) => risk.requires_gm_approval(),
            (PendingCompliance, Approved) => !risk.requires_gm_approval(),
            _ => false,
        }
    }

    /// The role must be the reviewer of the case's current stage.
    fn ensure_case_reviewer(
        status: CaseStatus,
        role: UserRole,
        target: CaseStatus,
        action: &'static str,
    ) -> Result<(), WorkflowError> {
        if role == UserRole::Rm {
            return Err(WorkflowError::RoleNotPermitted { role, action });
        }
        match status.reviewer() {
            Some(expected) if expected == role => Ok(()),
            _ => Err(WorkflowError::InvalidCaseTransition {
                from: status,
                to: target,
            }),
        }
    }

    fn set_account_status(
        case: &mut Case,
        account_id: AccountId,
        status: AccountStatus,
        snapshot: Option<ApprovalSnapshot>,
    ) -> Result<(), WorkflowError> {
        let account = case
            .account_mut(account_id)
            .ok_or(WorkflowError::AccountNotFound(account_id))?;
        account.status = status;
        account.approval_snapshot = snapshot;
        Ok(())
    }
}

fn stage_details(from: CaseStatus, to: CaseStatus, notes: Option<String>) -> String {
    match notes.filter(|n| !n.trim().is_empty()) {
        Some(notes) => format!("{from} -> {to}: {notes}"),
        None => format!("{from} -> {to}"),
    }
}

/// Approvals recorded after the most recent submission of the case
/// (`account_id == None`) or of one account.
fn approvals_since(
    activities: &[Activity],
    submitted: &str,
    approved: &str,
    account_id: Option<AccountId>,
) -> Vec<StageApproval> {
    let concerns = |activity: &Activity| activity.account_id == account_id;

    let start = activities
        .iter()
        .rposition(|a| a.action == submitted && concerns(a))
        .map_or(0, |i| i + 1);

    activities[start..]
        .iter()
        .filter(|a| a.action == approved && concerns(a))
        .map(|a| StageApproval {
            actor: a.actor,
            role: a.role,
            at: a.timestamp,
        })
        .collect()
}

fn snapshot(
    approved_by: UserId,
    approved_at: DateTime<Utc>,
    risk_level: RiskLevel,
    approvals: Vec<StageApproval>,
) -> ApprovalSnapshot {
    ApprovalSnapshot {
        approved_by,
        approved_at,
        risk_level,
        approvals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::{Account, EntityData};
    use crate::catalog::{Requirement, RequirementCategory};
    use crate::checklist::{ChecklistItem, Owner, Priority, RequirementId, SectionKind};
    use crate::workflow::types::DocumentStatus;
    use kyc_shared::types::CaseId;
    use rstest::rstest;
    use uuid::Uuid;

    fn user(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    fn account_id() -> AccountId {
        AccountId::from_uuid(Uuid::from_u128(500))
    }

    fn case(risk: RiskLevel) -> Case {
        let mut case = Case::new(
            CaseId::from_uuid(Uuid::from_u128(1)),
            EntityData {
                entity_name: "Acme Pte Ltd".to_string(),
                entity_type: "Private Limited Company".to_string(),
                tax_id: None,
                registered_address: None,
            },
            risk,
        );
        case.accounts.push(Account {
            account_id: account_id(),
            account_type: "Current Account".to_string(),
            currency: "SGD".to_string(),
            status: AccountStatus::Proposed,
            approval_snapshot: None,
        });
        case
    }

    fn section(kind: SectionKind, title: &str, status: DocumentStatus) -> ChecklistSection {
        let item = ChecklistItem {
            requirement_id: RequirementId::entity(0),
            requirement: Requirement::new("Doc", RequirementCategory::Other, true),
            owner: Owner::Entity,
            status,
            submissions: Vec::new(),
            last_submission_date: None,
            priority: Priority::High,
        };
        ChecklistSection::new(kind, title.to_string(), String::new(), vec![item], true)
    }

    fn checklist(main: DocumentStatus, forms: DocumentStatus) -> Vec<ChecklistSection> {
        vec![
            section(SectionKind::Entity, "Entity Documents", main),
            section(
                SectionKind::Account(account_id()),
                "Account Forms - Current Account (SGD)",
                forms,
            ),
        ]
    }

    fn submitted(risk: RiskLevel) -> Case {
        let mut case = case(risk);
        CaseWorkflowService::submit_case(
            &mut case,
            &checklist(DocumentStatus::Verified, DocumentStatus::Missing),
            user(1),
            UserRole::Rm,
        )
        .unwrap();
        case
    }

    #[test]
    fn test_submit_case_requires_open_gate() {
        let mut case = case(RiskLevel::Low);
        let result = CaseWorkflowService::submit_case(
            &mut case,
            &checklist(DocumentStatus::Rejected, DocumentStatus::Verified),
            user(1),
            UserRole::Rm,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::ChecklistIncomplete { outstanding: 1 })
        ));
        assert_eq!(case.status, CaseStatus::Draft);
        assert!(case.activities.is_empty());
    }

    #[test]
    fn test_submit_case_ignores_account_forms() {
        let case = submitted(RiskLevel::Low);
        assert_eq!(case.status, CaseStatus::PendingChecker);
        assert_eq!(case.activities[0].action, CASE_SUBMITTED);
    }

    #[test]
    fn test_only_rm_submits_case() {
        let mut case = case(RiskLevel::Low);
        let result = CaseWorkflowService::submit_case(&mut case, &[], user(2), UserRole::Checker);
        assert!(matches!(result, Err(WorkflowError::RoleNotPermitted { .. })));
    }

    #[test]
    fn test_cannot_resubmit_pending_case() {
        let mut case = submitted(RiskLevel::Low);
        let result = CaseWorkflowService::submit_case(&mut case, &[], user(1), UserRole::Rm);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidCaseTransition { .. })
        ));
    }

    #[test]
    fn test_low_risk_case_approved_by_compliance() {
        let mut case = submitted(RiskLevel::Medium);
        let status =
            CaseWorkflowService::approve_case(&mut case, user(2), UserRole::Checker, None).unwrap();
        assert_eq!(status, CaseStatus::PendingCompliance);

        let status = CaseWorkflowService::approve_case(
            &mut case,
            user(3),
            UserRole::Compliance,
            Some("All documents in order".to_string()),
        )
        .unwrap();
        assert_eq!(status, CaseStatus::Approved);

        let snapshot = case.kyc_approval_snapshot.as_ref().unwrap();
        assert_eq!(snapshot.approved_by, user(3));
        assert_eq!(snapshot.risk_level, RiskLevel::Medium);
        let roles: Vec<_> = snapshot.approvals.iter().map(|a| a.role).collect();
        assert_eq!(roles, vec![UserRole::Checker, UserRole::Compliance]);
    }

    #[rstest]
    #[case(RiskLevel::High)]
    #[case(RiskLevel::Critical)]
    fn test_high_risk_case_needs_gm(#[case] risk: RiskLevel) {
        let mut case = submitted(risk);
        CaseWorkflowService::approve_case(&mut case, user(2), UserRole::Checker, None).unwrap();
        let status =
            CaseWorkflowService::approve_case(&mut case, user(3), UserRole::Compliance, None)
                .unwrap();
        assert_eq!(status, CaseStatus::PendingGm);
        assert!(case.kyc_approval_snapshot.is_none());

        let status =
            CaseWorkflowService::approve_case(&mut case, user(4), UserRole::Gm, None).unwrap();
        assert_eq!(status, CaseStatus::Approved);
        assert_eq!(
            case.kyc_approval_snapshot.as_ref().unwrap().approvals.len(),
            3
        );
    }

    #[test]
    fn test_wrong_reviewer_for_stage() {
        let mut case = submitted(RiskLevel::Low);
        let result = CaseWorkflowService::approve_case(&mut case, user(3), UserRole::Compliance, None);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidCaseTransition { .. })
        ));

        let result = CaseWorkflowService::approve_case(&mut case, user(1), UserRole::Rm, None);
        assert!(matches!(result, Err(WorkflowError::RoleNotPermitted { .. })));
    }

    #[test]
    fn test_reject_and_resubmit_resets_snapshot_window() {
        let mut case = submitted(RiskLevel::Low);
        CaseWorkflowService::approve_case(&mut case, user(2), UserRole::Checker, None).unwrap();

        let empty = CaseWorkflowService::reject_case(&mut case, user(3), UserRole::Compliance, "  ".to_string());
        assert!(matches!(empty, Err(WorkflowError::RejectionReasonRequired)));

        let status = CaseWorkflowService::reject_case(
            &mut case,
            user(3),
            UserRole::Compliance,
            "Directors' IDs expired".to_string(),
        )
        .unwrap();
        assert_eq!(status, CaseStatus::Rejected);

        CaseWorkflowService::submit_case(
            &mut case,
            &checklist(DocumentStatus::PendingCheckerVerification, DocumentStatus::Missing),
            user(1),
            UserRole::Rm,
        )
        .unwrap();
        CaseWorkflowService::approve_case(&mut case, user(5), UserRole::Checker, None).unwrap();
        CaseWorkflowService::approve_case(&mut case, user(3), UserRole::Compliance, None).unwrap();

        let approvals = &case.kyc_approval_snapshot.as_ref().unwrap().approvals;
        assert_eq!(approvals.len(), 2);
        assert_eq!(approvals[0].actor, user(5));
    }

    #[test]
    fn test_cannot_reject_draft_case() {
        let mut case = case(RiskLevel::Low);
        let result =
            CaseWorkflowService::reject_case(&mut case, user(2), UserRole::Checker, "No".to_string());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidCaseTransition { .. })
        ));
    }

    #[test]
    fn test_account_gate_is_independent_of_case_gate() {
        let mut case = case(RiskLevel::Low);
        let sections = checklist(DocumentStatus::Missing, DocumentStatus::PendingCheckerVerification);

        let status = CaseWorkflowService::submit_account(
            &mut case,
            &sections,
            account_id(),
            user(1),
            UserRole::Rm,
        )
        .unwrap();
        assert_eq!(status, AccountStatus::PendingChecker);
        assert_eq!(case.status, CaseStatus::Draft);
    }

    #[test]
    fn test_account_gate_blocks_missing_forms() {
        let mut case = case(RiskLevel::Low);
        let sections = checklist(DocumentStatus::Verified, DocumentStatus::Missing);
        let result = CaseWorkflowService::submit_account(
            &mut case,
            &sections,
            account_id(),
            user(1),
            UserRole::Rm,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::ChecklistIncomplete { outstanding: 1 })
        ));
    }

    #[test]
    fn test_account_gate_fails_closed_without_forms_section() {
        let mut case = case(RiskLevel::Low);
        let sections = vec![section(
            SectionKind::Entity,
            "Entity Documents",
            DocumentStatus::Verified,
        )];

        let result = CaseWorkflowService::submit_account(
            &mut case,
            &sections,
            account_id(),
            user(1),
            UserRole::Rm,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::AccountChecklistMissing(id)) if id == account_id()
        ));
        assert_eq!(case.account(account_id()).unwrap().status, AccountStatus::Proposed);
        assert!(case.activities.is_empty());
    }

    #[test]
    fn test_account_snapshot_only_counts_its_own_approvals() {
        let other = AccountId::from_uuid(Uuid::from_u128(501));
        let mut case = case(RiskLevel::Low);
        case.accounts.push(Account {
            account_id: other,
            account_type: "Fixed Deposit".to_string(),
            currency: "USD".to_string(),
            status: AccountStatus::Proposed,
            approval_snapshot: None,
        });
        let mut sections = checklist(DocumentStatus::Verified, DocumentStatus::Verified);
        sections.push(section(
            SectionKind::Account(other),
            "Account Forms - Fixed Deposit (USD)",
            DocumentStatus::Verified,
        ));

        for id in [account_id(), other] {
            CaseWorkflowService::submit_account(&mut case, &sections, id, user(1), UserRole::Rm)
                .unwrap();
        }
        CaseWorkflowService::approve_account(&mut case, other, user(4), UserRole::Checker).unwrap();
        CaseWorkflowService::approve_account(&mut case, account_id(), user(2), UserRole::Checker)
            .unwrap();
        CaseWorkflowService::approve_account(&mut case, other, user(5), UserRole::Compliance)
            .unwrap();
        CaseWorkflowService::approve_account(&mut case, account_id(), user(3), UserRole::Compliance)
            .unwrap();

        let approvers = |id: AccountId| -> Vec<UserId> {
            case.account(id)
                .unwrap()
                .approval_snapshot
                .as_ref()
                .unwrap()
                .approvals
                .iter()
                .map(|a| a.actor)
                .collect()
        };
        assert_eq!(approvers(account_id()), vec![user(2), user(3)]);
        assert_eq!(approvers(other), vec![user(4), user(5)]);
        assert!(case
            .activities
            .iter()
            .all(|a| a.account_id.is_some() && a.details.as_deref().is_some_and(|d| d.contains("->"))));
    }

    #[test]
    fn test_account_pipeline_opens_with_snapshot() {
        let mut case = case(RiskLevel::High);
        let sections = checklist(DocumentStatus::Missing, DocumentStatus::Verified);
        CaseWorkflowService::submit_account(&mut case, &sections, account_id(), user(1), UserRole::Rm)
            .unwrap();

        let result = CaseWorkflowService::approve_account(&mut case, account_id(), user(3), UserRole::Compliance);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidAccountTransition { .. })
        ));

        CaseWorkflowService::approve_account(&mut case, account_id(), user(2), UserRole::Checker)
            .unwrap();
        let status =
            CaseWorkflowService::approve_account(&mut case, account_id(), user(3), UserRole::Compliance)
                .unwrap();
        assert_eq!(status, AccountStatus::Opened);

        let account = case.account(account_id()).unwrap();
        let snapshot = account.approval_snapshot.as_ref().unwrap();
        assert_eq!(snapshot.approvals.len(), 2);
        assert_eq!(snapshot.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_reject_account() {
        let mut case = case(RiskLevel::Low);
        let sections = checklist(DocumentStatus::Missing, DocumentStatus::Verified);
        CaseWorkflowService::submit_account(&mut case, &sections, account_id(), user(1), UserRole::Rm)
            .unwrap();

        let status = CaseWorkflowService::reject_account(
            &mut case,
            account_id(),
            user(2),
            UserRole::Checker,
            "Mandate unsigned".to_string(),
        )
        .unwrap();
        assert_eq!(status, AccountStatus::Rejected);
        assert_eq!(case.activities.last().unwrap().action, ACCOUNT_REJECTED);

        let again =
            CaseWorkflowService::submit_account(&mut case, &sections, account_id(), user(1), UserRole::Rm)
                .unwrap();
        assert_eq!(again, AccountStatus::PendingChecker);
    }

    #[test]
    fn test_unknown_account() {
        let mut case = case(RiskLevel::Low);
        let missing = AccountId::from_uuid(Uuid::nil());
        let result = CaseWorkflowService::approve_account(&mut case, missing, user(2), UserRole::Checker);
        assert!(matches!(result, Err(WorkflowError::AccountNotFound(id)) if id == missing));
    }

    #[test]
    fn test_case_transition_table() {
        use CaseStatus::*;
        assert!(CaseWorkflowService::is_valid_case_transition(Draft, PendingChecker, RiskLevel::Low));
        assert!(CaseWorkflowService::is_valid_case_transition(Rejected, PendingChecker, RiskLevel::Low));
        assert!(CaseWorkflowService::is_valid_case_transition(PendingCompliance, Approved, RiskLevel::Medium));
        assert!(!CaseWorkflowService::is_valid_case_transition(PendingCompliance, Approved, RiskLevel::High));
        assert!(CaseWorkflowService::is_valid_case_transition(PendingCompliance, PendingGm, RiskLevel::Critical));
        assert!(!CaseWorkflowService::is_valid_case_transition(PendingCompliance, PendingGm, RiskLevel::Low));
        assert!(!CaseWorkflowService::is_valid_case_transition(Draft, Approved, RiskLevel::Low));
        assert!(!CaseWorkflowService::is_valid_case_transition(Approved, Rejected, RiskLevel::Low));
    }
}
