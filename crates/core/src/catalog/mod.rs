//! Requirement catalog: the bank's document policy as lookup tables.
//!
//! # Modules
//!
//! - `types` - Requirement, category, and catalog lookup types
//! - `builtin` - The default policy tables
//! - `error` - Catalog authoring errors

pub mod builtin;
pub mod error;
pub mod types;

pub use builtin::{FOREIGNER, INDIVIDUAL_ACCOUNT, RESIDENT};
pub use error::CatalogError;
pub use types::{BankFormTemplates, Requirement, RequirementCatalog, RequirementCategory};
