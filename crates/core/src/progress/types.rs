//! Progress summary types.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::workflow::types::{DocumentStatus, UserRole};

/// Aggregate view of the main checklist for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    /// Role the progress was computed for.
    pub role: UserRole,
    /// Items in the main checklist.
    pub total_items: usize,
    /// Required items in the main checklist.
    pub required_items: usize,
    /// Required items still missing, rejected or expired.
    pub outstanding_required: usize,
    /// Item count per presented status.
    pub by_status: BTreeMap<DocumentStatus, usize>,
    /// Role-sensitive progress, 0 to 100.
    pub progress_percentage: Decimal,
    /// Case-level submission gate.
    pub is_submittable: bool,
}
