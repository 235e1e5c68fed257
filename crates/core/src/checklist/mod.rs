//! Checklist derivation.
//!
//! Turns a case, its party roster and the requirement catalog into ordered
//! sections of checklist items, each carrying its presented status and
//! submission history.
//!
//! # Modules
//!
//! - `types` - Checklist items, sections and requirement ids
//! - `generator` - The checklist generator

pub mod generator;
pub mod types;

#[cfg(test)]
mod generator_props;

pub use generator::{
    ChecklistGenerator, HIGH_RISK_SCORE_THRESHOLD, SOURCE_OF_WEALTH, source_of_wealth_requirement,
};
pub use types::{
    ChecklistItem, ChecklistSection, ENTITY_OWNER, Owner, Priority, RequirementId, SectionKind,
};
