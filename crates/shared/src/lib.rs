//! Shared types, errors, and configuration for the KYC checklist engine.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for cases, parties, accounts, submissions and documents
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CategoryMode, ChecklistConfig, LoggingConfig};
pub use error::{AppError, AppResult};
