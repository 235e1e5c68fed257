//! Progress and submittability gates derived from a generated checklist.

pub mod calculator;
pub mod types;

pub use calculator::{ACCOUNT_FORMS_PREFIX, ProgressCalculator, percentage};
pub use types::ChecklistSummary;
