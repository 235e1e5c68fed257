//! Workflow domain types for document review and case approval.
//!
//! This module defines the status enums for documents, cases and accounts,
//! the acting roles, and the audit record produced by each document action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use kyc_shared::types::UserId;

/// Review status of a document submission.
///
/// The valid transitions are:
/// - Missing / Rejected / Expired / pending → Pending Checker Verification (submit)
/// - Pending Checker Verification → Pending Compliance Verification (checker approve)
/// - Pending Compliance Verification → Verified (compliance approve)
/// - Pending Checker / Pending Compliance → Rejected (reject)
///
/// `Expired` is never stored; it is presented in place of `Verified` once
/// the document's own expiry date has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Nothing has been submitted.
    Missing,
    /// Awaiting first-line review.
    #[serde(rename = "Pending Checker Verification")]
    PendingCheckerVerification,
    /// Awaiting second-line review.
    #[serde(rename = "Pending Compliance Verification")]
    PendingComplianceVerification,
    /// Accepted by compliance.
    Verified,
    /// Sent back by a reviewer.
    Rejected,
    /// Verified, but the document itself has expired.
    Expired,
}

impl DocumentStatus {
    /// All statuses, in pipeline order.
    pub const ALL: [Self; 6] = [
        Self::Missing,
        Self::PendingCheckerVerification,
        Self::PendingComplianceVerification,
        Self::Verified,
        Self::Rejected,
        Self::Expired,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::PendingCheckerVerification => "Pending Checker Verification",
            Self::PendingComplianceVerification => "Pending Compliance Verification",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
            Self::Expired => "Expired",
        }
    }

    /// Parses a status from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "missing" => Some(Self::Missing),
            "pending checker verification" => Some(Self::PendingCheckerVerification),
            "pending compliance verification" => Some(Self::PendingComplianceVerification),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// Returns true while a reviewer still has to act.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::PendingCheckerVerification | Self::PendingComplianceVerification
        )
    }

    /// Returns true if the item counts toward section completion and the
    /// submittability gates: pending review or verified.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.is_pending() || self.is_terminal_success()
    }

    /// Returns true only for `Verified`.
    #[must_use]
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Returns true once the RM has handed the document over.
    ///
    /// Note that `Expired` counts: the RM did submit it.
    #[must_use]
    pub fn is_submitted(&self) -> bool {
        !matches!(self, Self::Missing | Self::Rejected)
    }

    /// Returns true if the RM may attach a new submission.
    #[must_use]
    pub fn accepts_new_submission(&self) -> bool {
        matches!(self, Self::Missing | Self::Rejected | Self::Expired) || self.is_pending()
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of the acting bank user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    /// Relationship Manager: originates cases and submits documents.
    #[serde(rename = "RM")]
    Rm,
    /// First-line reviewer.
    Checker,
    /// Second-line reviewer with final document authority.
    Compliance,
    /// General Manager: final approver for High and Critical risk cases.
    #[serde(rename = "GM")]
    Gm,
}

impl UserRole {
    /// Parse a role from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rm" => Some(Self::Rm),
            "checker" => Some(Self::Checker),
            "compliance" => Some(Self::Compliance),
            "gm" => Some(Self::Gm),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rm => "RM",
            Self::Checker => "Checker",
            Self::Compliance => "Compliance",
            Self::Gm => "GM",
        }
    }

    /// Returns true for roles that review rather than submit.
    #[must_use]
    pub fn is_reviewer(&self) -> bool {
        !matches!(self, Self::Rm)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a KYC case.
///
/// - Draft / Rejected → Pending Checker Review (RM submit, checklist gate open)
/// - Pending Checker Review → Pending Compliance Review (checker approve)
/// - Pending Compliance Review → Pending GM Approval (compliance approve, High/Critical risk)
/// - Pending Compliance Review → Approved (compliance approve, Low/Medium risk)
/// - Pending GM Approval → Approved (GM approve)
/// - any pending stage → Rejected (reviewer of that stage rejects)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Being prepared by the RM.
    #[default]
    Draft,
    /// Submitted, awaiting the checker.
    #[serde(rename = "Pending Checker Review")]
    PendingChecker,
    /// Awaiting compliance.
    #[serde(rename = "Pending Compliance Review")]
    PendingCompliance,
    /// Awaiting the General Manager.
    #[serde(rename = "Pending GM Approval")]
    PendingGm,
    /// KYC approved.
    Approved,
    /// Sent back to the RM.
    Rejected,
}

impl CaseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingChecker => "Pending Checker Review",
            Self::PendingCompliance => "Pending Compliance Review",
            Self::PendingGm => "Pending GM Approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// The role expected to act on a case in this status.
    #[must_use]
    pub fn reviewer(&self) -> Option<UserRole> {
        match self {
            Self::PendingChecker => Some(UserRole::Checker),
            Self::PendingCompliance => Some(UserRole::Compliance),
            Self::PendingGm => Some(UserRole::Gm),
            Self::Draft | Self::Approved | Self::Rejected => None,
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of an account proposed under a case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    /// Proposed by the RM, forms being collected.
    #[default]
    Proposed,
    /// Awaiting the checker.
    #[serde(rename = "Pending Checker Review")]
    PendingChecker,
    /// Awaiting compliance.
    #[serde(rename = "Pending Compliance Review")]
    PendingCompliance,
    /// Account opened.
    Opened,
    /// Sent back to the RM.
    Rejected,
}

impl AccountStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "Proposed",
            Self::PendingChecker => "Pending Checker Review",
            Self::PendingCompliance => "Pending Compliance Review",
            Self::Opened => "Opened",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated document action with its audit data.
#[derive(Debug, Clone)]
pub enum DocumentAction {
    /// A new submission was attached.
    Submit {
        /// Status of the new submission.
        new_status: DocumentStatus,
        /// The RM who submitted.
        submitted_by: UserId,
        /// When it was submitted.
        submitted_at: DateTime<Utc>,
    },
    /// A reviewer moved the submission forward.
    Approve {
        /// Status before approval.
        from: DocumentStatus,
        /// Status after approval.
        new_status: DocumentStatus,
        /// The approving reviewer.
        approved_by: UserId,
        /// The reviewer's role.
        role: UserRole,
        /// When it was approved.
        approved_at: DateTime<Utc>,
        /// Optional reviewer notes.
        notes: Option<String>,
    },
    /// A reviewer sent the submission back.
    Reject {
        /// Status before rejection.
        from: DocumentStatus,
        /// Always `Rejected`.
        new_status: DocumentStatus,
        /// The rejecting reviewer.
        rejected_by: UserId,
        /// The reviewer's role.
        role: UserRole,
        /// When it was rejected.
        rejected_at: DateTime<Utc>,
        /// Why it was rejected.
        reason: String,
    },
    /// A remark without a status change.
    Comment {
        /// Unchanged status.
        status: DocumentStatus,
        /// Who wrote it.
        author: UserId,
        /// The author's role.
        role: UserRole,
        /// When it was written.
        at: DateTime<Utc>,
        /// The remark.
        text: String,
    },
}

impl DocumentAction {
    /// Returns the status the submission has after this action.
    #[must_use]
    pub fn new_status(&self) -> DocumentStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
            Self::Comment { status, .. } => *status,
        }
    }

    /// Returns when the action happened.
    #[must_use]
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Submit { submitted_at, .. } => *submitted_at,
            Self::Approve { approved_at, .. } => *approved_at,
            Self::Reject { rejected_at, .. } => *rejected_at,
            Self::Comment { at, .. } => *at,
        }
    }

    /// Free text carried by the action: approval notes, rejection reason or
    /// comment text.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        match self {
            Self::Submit { .. } => None,
            Self::Approve { notes, .. } => notes.as_deref(),
            Self::Reject { reason, .. } => Some(reason),
            Self::Comment { text, .. } => Some(text),
        }
    }
}
