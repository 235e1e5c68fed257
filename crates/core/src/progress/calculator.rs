//! Progress and gate calculations over a generated checklist.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use kyc_shared::types::AccountId;

use crate::checklist::{ChecklistItem, ChecklistSection, SectionKind};
use crate::progress::types::ChecklistSummary;
use crate::workflow::types::{DocumentStatus, UserRole};

/// Title prefix of per-account sections.
pub const ACCOUNT_FORMS_PREFIX: &str = "Account Forms";

/// `done / total` as a percentage rounded to 2 dp. Zero when `total` is zero.
#[must_use]
pub fn percentage(done: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(done) / Decimal::from(total) * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Stateless calculator for case and account gates.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// The main KYC checklist: every section except the account forms.
    pub fn main_checklist(
        sections: &[ChecklistSection],
    ) -> impl Iterator<Item = &ChecklistSection> {
        sections
            .iter()
            .filter(|s| !s.title.starts_with(ACCOUNT_FORMS_PREFIX))
    }

    /// Required main-checklist items that are missing, rejected or expired.
    #[must_use]
    pub fn outstanding_required(sections: &[ChecklistSection]) -> Vec<&ChecklistItem> {
        Self::main_checklist(sections)
            .flat_map(|s| s.items.iter())
            .filter(|i| i.is_blocking())
            .collect()
    }

    /// Case-level gate for "Submit for Checker Review".
    ///
    /// True iff every required item in the main checklist is pending review
    /// or verified.
    #[must_use]
    pub fn is_submittable(sections: &[ChecklistSection]) -> bool {
        Self::main_checklist(sections)
            .flat_map(|s| s.items.iter())
            .all(|i| !i.is_blocking())
    }

    /// Role-sensitive progress over the main checklist.
    ///
    /// For the RM an item is done once submitted (not Missing or Rejected);
    /// for reviewers only once Verified.
    #[must_use]
    pub fn progress_percentage(sections: &[ChecklistSection], role: UserRole) -> Decimal {
        let (done, total) = Self::main_checklist(sections)
            .flat_map(|s| s.items.iter())
            .fold((0, 0), |(done, total), item| {
                let counted = Self::is_done_for(item.status, role);
                (done + usize::from(counted), total + 1)
            });
        percentage(done, total)
    }

    /// Whether a status counts as done from the role's point of view.
    #[must_use]
    pub fn is_done_for(status: DocumentStatus, role: UserRole) -> bool {
        if role.is_reviewer() {
            status.is_terminal_success()
        } else {
            status.is_submitted()
        }
    }

    /// The forms section generated for an account.
    #[must_use]
    pub fn account_section(
        sections: &[ChecklistSection],
        account_id: AccountId,
    ) -> Option<&ChecklistSection> {
        sections
            .iter()
            .find(|s| s.kind == SectionKind::Account(account_id))
    }

    /// Account-level gate for "Submit Account for Review": every required
    /// form in the account's own section is pending review or verified.
    #[must_use]
    pub fn is_account_submittable(section: &ChecklistSection) -> bool {
        section.items.iter().all(|i| !i.is_blocking())
    }

    /// Totals, gates and progress for display.
    #[must_use]
    pub fn summarize(sections: &[ChecklistSection], role: UserRole) -> ChecklistSummary {
        let mut by_status = BTreeMap::new();
        let mut total_items = 0;
        let mut required_items = 0;

        for item in Self::main_checklist(sections).flat_map(|s| s.items.iter()) {
            total_items += 1;
            if item.is_required() {
                required_items += 1;
            }
            *by_status.entry(item.status).or_insert(0) += 1;
        }

        ChecklistSummary {
            role,
            total_items,
            required_items,
            outstanding_required: Self::outstanding_required(sections).len(),
            by_status,
            progress_percentage: Self::progress_percentage(sections, role),
            is_submittable: Self::is_submittable(sections),
        }
    }
}
