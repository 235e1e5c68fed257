//! Property-based tests for `ChecklistGenerator`.
//!
//! - Generation is deterministic
//! - Section order is entity, parties in link order, accounts in account order
//! - PEP and high-risk parties get exactly one source of wealth item
//! - Submissions without an expiry date never present as Expired
//! - RM progress is never below reviewer progress

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use kyc_shared::types::{AccountId, CaseId, DocumentId, PartyId, SubmissionId, UserId};

use crate::case::{
    Account, Case, DocumentLink, EntityData, Party, RelatedPartyLink, RiskLevel, Submission,
    SubmissionMethod,
};
use crate::catalog::{FOREIGNER, INDIVIDUAL_ACCOUNT, RESIDENT};
use crate::checklist::generator::{ChecklistGenerator, HIGH_RISK_SCORE_THRESHOLD, SOURCE_OF_WEALTH};
use crate::checklist::types::{RequirementId, SectionKind};
use crate::progress::ProgressCalculator;
use crate::workflow::types::{AccountStatus, DocumentStatus, UserRole};

fn arb_entity_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(INDIVIDUAL_ACCOUNT.to_string()),
        Just("Private Limited Company".to_string()),
        Just("Public Company".to_string()),
        Just("Sole Proprietorship".to_string()),
        Just("Partnership".to_string()),
        Just("Trust".to_string()),
        Just("Unregistered Club".to_string()),
    ]
}

fn arb_risk() -> impl Strategy<Value = RiskLevel> {
    prop_oneof![
        Just(RiskLevel::Low),
        Just(RiskLevel::Medium),
        Just(RiskLevel::High),
        Just(RiskLevel::Critical),
    ]
}

fn arb_residency() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(RESIDENT.to_string()),
        Just(FOREIGNER.to_string()),
        Just("Stateless".to_string()),
    ]
}

fn arb_stored_status() -> impl Strategy<Value = DocumentStatus> {
    prop_oneof![
        Just(DocumentStatus::PendingCheckerVerification),
        Just(DocumentStatus::PendingComplianceVerification),
        Just(DocumentStatus::Verified),
        Just(DocumentStatus::Rejected),
    ]
}

/// (residency, is_pep, risk_score, is_primary)
fn arb_party() -> impl Strategy<Value = (String, bool, u32, bool)> {
    (arb_residency(), any::<bool>(), 0u32..=100, any::<bool>())
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn submission(n: u128, status: DocumentStatus, expiry_date: Option<NaiveDate>) -> Submission {
    Submission {
        submission_id: SubmissionId::from_uuid(Uuid::from_u128(n)),
        master_doc_id: DocumentId::from_uuid(Uuid::from_u128(n)),
        status,
        submitted_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        submitted_by: UserId::from_uuid(Uuid::from_u128(1)),
        submission_method: SubmissionMethod::Scan,
        comments: Vec::new(),
        review_trail: Vec::new(),
        published_date: None,
        expiry_date,
    }
}

fn build_case(
    entity_type: String,
    risk: RiskLevel,
    partys: &[(String, bool, u32, bool)],
    account_count: usize,
) -> (Case, Vec<Party>) {
    let mut case = Case::new(
        CaseId::from_uuid(Uuid::from_u128(1)),
        EntityData {
            entity_name: "Generated Entity".to_string(),
            entity_type,
            tax_id: None,
            registered_address: None,
        },
        risk,
    );

    let mut parties = Vec::new();
    for (i, (residency, is_pep, risk_score, is_primary)) in partys.iter().enumerate() {
        let id = PartyId::from_uuid(Uuid::from_u128(1_000 + i as u128));
        parties.push(Party {
            id,
            name: format!("Party {i}"),
            residency_status: residency.clone(),
            is_pep: *is_pep,
            risk_score: *risk_score,
        });
        case.related_party_links.push(RelatedPartyLink {
            party_id: id,
            relationship_type: "Director".to_string(),
            is_primary: *is_primary,
            ownership_percentage: None,
        });
    }

    for i in 0..account_count {
        case.accounts.push(Account {
            account_id: AccountId::from_uuid(Uuid::from_u128(2_000 + i as u128)),
            account_type: "Current Account".to_string(),
            currency: "SGD".to_string(),
            status: AccountStatus::Proposed,
            approval_snapshot: None,
        });
    }

    (case, parties)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same input, byte-identical output.
    #[test]
    fn prop_generation_is_deterministic(
        entity_type in arb_entity_type(),
        risk in arb_risk(),
        partys in prop::collection::vec(arb_party(), 0..4),
        accounts in 0usize..3,
    ) {
        let (case, parties) = build_case(entity_type, risk, &partys, accounts);
        let generator = ChecklistGenerator::default();

        let first = generator.generate(&case, &parties, as_of());
        let second = generator.generate(&case, &parties, as_of());

        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Entity first, then parties in link order, then accounts in order.
    #[test]
    fn prop_section_order(
        entity_type in arb_entity_type(),
        risk in arb_risk(),
        partys in prop::collection::vec(arb_party(), 0..4),
        accounts in 0usize..3,
    ) {
        let (case, parties) = build_case(entity_type, risk, &partys, accounts);
        let sections = ChecklistGenerator::default().generate(&case, &parties, as_of());

        let rank = |kind: &SectionKind| match kind {
            SectionKind::Entity => (0, 0),
            SectionKind::Party(id) => (
                1,
                case.related_party_links.iter().position(|l| l.party_id == *id).unwrap(),
            ),
            SectionKind::Account(id) => (
                2,
                case.accounts.iter().position(|a| a.account_id == *id).unwrap(),
            ),
        };
        let ranks: Vec<_> = sections.iter().map(|s| rank(&s.kind)).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        prop_assert_eq!(ranks, sorted);

        let account_sections = sections
            .iter()
            .filter(|s| matches!(s.kind, SectionKind::Account(_)))
            .count();
        prop_assert_eq!(account_sections, accounts);
        prop_assert!(sections.iter().all(|s| !s.items.is_empty()));
    }

    /// Exactly one source of wealth item when PEP or score above threshold,
    /// none otherwise.
    #[test]
    fn prop_source_of_wealth_once(party in arb_party()) {
        let (case, parties) = build_case(
            "Private Limited Company".to_string(),
            RiskLevel::Low,
            std::slice::from_ref(&party),
            0,
        );
        let (_, is_pep, risk_score, _) = party;
        let sections = ChecklistGenerator::default().generate(&case, &parties, as_of());

        let sow_items = sections
            .iter()
            .flat_map(|s| s.items.iter())
            .filter(|i| i.requirement.name == SOURCE_OF_WEALTH)
            .count();
        let expected = usize::from(is_pep || risk_score > HIGH_RISK_SCORE_THRESHOLD);
        prop_assert_eq!(sow_items, expected);
    }

    /// Verified submissions with no expiry date stay Verified forever.
    #[test]
    fn prop_no_expiry_never_expired(
        days_ahead in 0i64..36_500,
        risk in arb_risk(),
    ) {
        let (mut case, parties) = build_case("Trust".to_string(), risk, &[], 0);
        case.document_links.push(DocumentLink {
            requirement_id: RequirementId::entity(0),
            submissions: vec![submission(1, DocumentStatus::Verified, None)],
        });
        let as_of = as_of() + chrono::Duration::days(days_ahead);

        let sections = ChecklistGenerator::default().generate(&case, &parties, as_of);
        prop_assert_eq!(sections[0].items[0].status, DocumentStatus::Verified);
        prop_assert!(sections
            .iter()
            .flat_map(|s| s.items.iter())
            .all(|i| i.status != DocumentStatus::Expired));
    }

    /// Every reviewer-done item is RM-done, so RM progress dominates.
    #[test]
    fn prop_rm_progress_at_least_reviewer(
        statuses in prop::collection::vec(arb_stored_status(), 0..12),
        expiring in prop::collection::vec(any::<bool>(), 12),
        risk in arb_risk(),
    ) {
        let (mut case, parties) = build_case("Private Limited Company".to_string(), risk, &[], 0);
        for (i, status) in statuses.iter().enumerate() {
            let expiry = expiring[i].then(|| NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
            case.document_links.push(DocumentLink {
                requirement_id: RequirementId::entity(i),
                submissions: vec![submission(i as u128, *status, expiry)],
            });
        }

        let sections = ChecklistGenerator::default().generate(&case, &parties, as_of());
        let rm = ProgressCalculator::progress_percentage(&sections, UserRole::Rm);
        for reviewer in [UserRole::Checker, UserRole::Compliance, UserRole::Gm] {
            prop_assert!(rm >= ProgressCalculator::progress_percentage(&sections, reviewer));
        }
    }
}
