//! Core business logic for the KYC checklist engine.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `catalog` - Requirement catalog (bank policy tables)
//! - `case` - Case, party and submission types
//! - `checklist` - Checklist derivation from a case and the catalog
//! - `workflow` - Document review state machine and approval pipelines
//! - `progress` - Progress percentages and submittability gates

pub mod case;
pub mod catalog;
pub mod checklist;
pub mod progress;
pub mod workflow;
