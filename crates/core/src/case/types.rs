//! Case domain types.
//!
//! A `Case` is owned by the case store; this crate reads it to derive the
//! checklist and appends to it when a workflow action is recorded.
//! Field names follow the store's camelCase JSON.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use kyc_shared::types::{AccountId, ActivityId, CaseId, DocumentId, PartyId, SubmissionId, UserId};

use crate::checklist::RequirementId;
use crate::workflow::types::{AccountStatus, CaseStatus, DocumentStatus, UserRole};

/// Risk rating assigned to a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Standard due diligence.
    Low,
    /// Source of funds required.
    Medium,
    /// Enhanced due diligence and GM approval.
    High,
    /// Enhanced due diligence, site visit and GM approval.
    Critical,
}

impl RiskLevel {
    /// Returns the string representation of the risk level.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Parses a risk level from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// High and Critical cases need the General Manager's sign-off.
    #[must_use]
    pub fn requires_gm_approval(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A person or company that can be linked to cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    /// Party identifier.
    pub id: PartyId,
    /// Display name.
    pub name: String,
    /// Residency bucket used to pick the party's document template.
    pub residency_status: String,
    /// Politically exposed person.
    #[serde(default, rename = "isPEP")]
    pub is_pep: bool,
    /// Screening score, 0 to 100.
    #[serde(default)]
    pub risk_score: u32,
}

/// Looks up a party in the roster.
#[must_use]
pub fn party_by_id(parties: &[Party], id: PartyId) -> Option<&Party> {
    parties.iter().find(|p| p.id == id)
}

/// A party's relationship to the case entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPartyLink {
    /// The linked party.
    pub party_id: PartyId,
    /// Relationship label, e.g. "Director" or "Trustee".
    pub relationship_type: String,
    /// Primary parties make their section mandatory.
    #[serde(default)]
    pub is_primary: bool,
    /// Shareholding, where relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_percentage: Option<Decimal>,
}

/// The legal entity being onboarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityData {
    /// Registered name.
    pub entity_name: String,
    /// Entity type, the key into the entity templates.
    pub entity_type: String,
    /// Tax or registry number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    /// Registered address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_address: Option<String>,
}

/// How the document reached the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionMethod {
    /// File upload.
    Upload,
    /// In-branch scan.
    Scan,
}

/// A remark on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Who wrote it.
    pub author: UserId,
    /// The author's role.
    pub role: UserRole,
    /// When it was written.
    pub timestamp: DateTime<Utc>,
    /// The remark.
    pub text: String,
}

/// One status change on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    /// Status before the review.
    pub from: DocumentStatus,
    /// Status after the review.
    pub to: DocumentStatus,
    /// The reviewer.
    pub actor: UserId,
    /// The reviewer's role.
    pub role: UserRole,
    /// When the review happened.
    pub at: DateTime<Utc>,
}

/// One version of a document submitted against a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Submission identifier.
    pub submission_id: SubmissionId,
    /// The uploaded document record.
    pub master_doc_id: DocumentId,
    /// Stored review status.
    pub status: DocumentStatus,
    /// When it was submitted.
    pub submitted_at: DateTime<Utc>,
    /// Who submitted it.
    pub submitted_by: UserId,
    /// Upload or scan.
    pub submission_method: SubmissionMethod,
    /// Remarks, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Status changes, oldest first.
    #[serde(default)]
    pub review_trail: Vec<ReviewEvent>,
    /// The document's own issue date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    /// The document's own expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl Submission {
    /// Returns true if the document's expiry date is before `as_of`.
    /// A submission without an expiry date never expires.
    #[must_use]
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < as_of)
    }

    /// The status shown to users: `Expired` in place of `Verified` once the
    /// document has expired. The stored status is left untouched.
    #[must_use]
    pub fn presented_status(&self, as_of: NaiveDate) -> DocumentStatus {
        if self.status == DocumentStatus::Verified && self.is_expired(as_of) {
            DocumentStatus::Expired
        } else {
            self.status
        }
    }
}

/// Submission history for one requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentLink {
    /// The requirement the submissions answer.
    pub requirement_id: RequirementId,
    /// Submissions, oldest first. Append-only.
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl DocumentLink {
    /// The latest submission, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&Submission> {
        self.submissions.last()
    }
}

/// One reviewer's sign-off captured in an approval snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageApproval {
    /// The approver.
    pub actor: UserId,
    /// The approver's role.
    pub role: UserRole,
    /// When they approved.
    pub at: DateTime<Utc>,
}

/// Frozen record of a completed approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalSnapshot {
    /// Final approver.
    pub approved_by: UserId,
    /// When the final approval happened.
    pub approved_at: DateTime<Utc>,
    /// Risk level at approval time.
    pub risk_level: RiskLevel,
    /// Every stage sign-off since the last submission, oldest first.
    pub approvals: Vec<StageApproval>,
}

/// An account proposed under the case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub account_id: AccountId,
    /// Product, e.g. "Current Account".
    pub account_type: String,
    /// ISO currency code.
    pub currency: String,
    /// Account lifecycle status.
    #[serde(default)]
    pub status: AccountStatus,
    /// Snapshot taken when the account was opened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_snapshot: Option<ApprovalSnapshot>,
}

/// Audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Entry identifier.
    pub id: ActivityId,
    /// Acting user.
    pub actor: UserId,
    /// Acting role.
    pub role: UserRole,
    /// Machine-readable action, e.g. `DOCUMENT_SUBMITTED`.
    pub action: String,
    /// Account the entry concerns; `None` for case and document entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Free-text details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

/// A KYC case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// Case identifier.
    pub case_id: CaseId,
    /// The entity being onboarded.
    pub entity_data: EntityData,
    /// Linked parties, in display order.
    #[serde(default)]
    pub related_party_links: Vec<RelatedPartyLink>,
    /// Case risk rating.
    pub risk_level: RiskLevel,
    /// Case lifecycle status.
    #[serde(default)]
    pub status: CaseStatus,
    /// Proposed accounts, in display order.
    #[serde(default)]
    pub accounts: Vec<Account>,
    /// Submission history per requirement.
    #[serde(default)]
    pub document_links: Vec<DocumentLink>,
    /// Audit log, oldest first. Append-only.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Snapshot taken when KYC was approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_approval_snapshot: Option<ApprovalSnapshot>,
}

impl Case {
    /// Creates an empty draft case.
    #[must_use]
    pub fn new(case_id: CaseId, entity_data: EntityData, risk_level: RiskLevel) -> Self {
        Self {
            case_id,
            entity_data,
            related_party_links: Vec::new(),
            risk_level,
            status: CaseStatus::Draft,
            accounts: Vec::new(),
            document_links: Vec::new(),
            activities: Vec::new(),
            kyc_approval_snapshot: None,
        }
    }

    /// Submission history for a requirement.
    #[must_use]
    pub fn document_link(&self, requirement_id: &RequirementId) -> Option<&DocumentLink> {
        self.document_links
            .iter()
            .find(|link| &link.requirement_id == requirement_id)
    }

    /// Mutable submission history for a requirement.
    pub fn document_link_mut(&mut self, requirement_id: &RequirementId) -> Option<&mut DocumentLink> {
        self.document_links
            .iter_mut()
            .find(|link| &link.requirement_id == requirement_id)
    }

    /// An account by id.
    #[must_use]
    pub fn account(&self, account_id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.account_id == account_id)
    }

    /// A mutable account by id.
    pub fn account_mut(&mut self, account_id: AccountId) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.account_id == account_id)
    }

    /// Appends an audit log entry.
    pub fn record_activity(
        &mut self,
        actor: UserId,
        role: UserRole,
        action: &str,
        details: Option<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.activities.push(Activity {
            id: ActivityId::new(),
            actor,
            role,
            action: action.to_string(),
            account_id: None,
            details,
            timestamp,
        });
    }

    /// Appends an audit log entry for one of the case's accounts.
    pub fn record_account_activity(
        &mut self,
        account_id: AccountId,
        actor: UserId,
        role: UserRole,
        action: &str,
        details: Option<String>,
        timestamp: DateTime<Utc>,
    ) {
        self.activities.push(Activity {
            id: ActivityId::new(),
            actor,
            role,
            action: action.to_string(),
            account_id: Some(account_id),
            details,
            timestamp,
        });
    }
}
