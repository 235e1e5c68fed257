//! Checklist types.
//!
//! Checklist items and sections are projections of a case; they are
//! rebuilt on every generation and never stored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use kyc_shared::types::{AccountId, PartyId};

use crate::case::Submission;
use crate::catalog::Requirement;
use crate::progress::percentage;
use crate::workflow::types::DocumentStatus;

/// Wire value for entity-owned requirements.
pub const ENTITY_OWNER: &str = "ENTITY";

/// Who a checklist item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The legal entity itself.
    Entity,
    /// A related party.
    Party(PartyId),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => f.write_str(ENTITY_OWNER),
            Self::Party(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for Owner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Owner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ENTITY_OWNER {
            return Ok(Self::Entity);
        }
        raw.parse::<PartyId>()
            .map(Self::Party)
            .map_err(serde::de::Error::custom)
    }
}

/// Stable identifier linking a checklist item to its submission history.
///
/// Derived from the section kind, the owner, and the position in the
/// catalog list, so the same case always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementId(String);

impl RequirementId {
    /// Entity template document at `index`.
    #[must_use]
    pub fn entity(index: usize) -> Self {
        Self(format!("req-entity-{index}"))
    }

    /// Bank form at `index`.
    #[must_use]
    pub fn forms(index: usize) -> Self {
        Self(format!("req-forms-{index}"))
    }

    /// Risk-based document at `index`.
    #[must_use]
    pub fn risk(index: usize) -> Self {
        Self(format!("req-risk-{index}"))
    }

    /// Residency template document at `index` for a party.
    #[must_use]
    pub fn party(party_id: PartyId, index: usize) -> Self {
        Self(format!("req-party-{party_id}-{index}"))
    }

    /// Source of wealth declaration for a high-risk party.
    #[must_use]
    pub fn party_source_of_wealth(party_id: PartyId) -> Self {
        Self(format!("req-party-{party_id}-sow"))
    }

    /// Account opening form at `index` for an account.
    #[must_use]
    pub fn account(account_id: AccountId, index: usize) -> Self {
        Self(format!("req-acct-{account_id}-{index}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display priority of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Required items.
    High,
    /// Optional items.
    Normal,
}

impl Priority {
    /// Required requirements are high priority.
    #[must_use]
    pub fn for_required(required: bool) -> Self {
        if required { Self::High } else { Self::Normal }
    }
}

/// One requirement on the checklist with its derived state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Stable id, the key into the case's document links.
    pub requirement_id: RequirementId,
    /// The requirement as presented (category may be relabelled).
    #[serde(flatten)]
    pub requirement: Requirement,
    /// Entity or party.
    #[serde(rename = "ownerPartyId")]
    pub owner: Owner,
    /// Presented status.
    pub status: DocumentStatus,
    /// Submission history, oldest first.
    pub submissions: Vec<Submission>,
    /// Timestamp of the latest submission.
    pub last_submission_date: Option<DateTime<Utc>>,
    /// High if required.
    pub priority: Priority,
}

impl ChecklistItem {
    /// Returns true if the item blocks submission while outstanding.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.requirement.required
    }

    /// Returns true if this item is required and not yet actionable.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.is_required() && !self.status.is_actionable()
    }
}

/// What a section covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    /// Entity documents, bank forms and risk-based documents.
    Entity,
    /// One related party's documents.
    Party(PartyId),
    /// One account's opening forms.
    Account(AccountId),
}

/// A titled group of checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSection {
    /// What the section covers.
    pub kind: SectionKind,
    /// Section title.
    pub title: String,
    /// Section description.
    pub description: String,
    /// Items in catalog order.
    pub items: Vec<ChecklistItem>,
    /// Share of items pending review or verified, 0 to 100.
    pub completion_percentage: Decimal,
    /// Entity, primary party and account sections are mandatory.
    pub is_mandatory: bool,
}

impl ChecklistSection {
    /// Builds a section, computing its completion percentage.
    #[must_use]
    pub fn new(
        kind: SectionKind,
        title: String,
        description: String,
        items: Vec<ChecklistItem>,
        is_mandatory: bool,
    ) -> Self {
        let done = items.iter().filter(|i| i.status.is_actionable()).count();
        let completion_percentage = percentage(done, items.len());
        Self {
            kind,
            title,
            description,
            items,
            completion_percentage,
            is_mandatory,
        }
    }
}
