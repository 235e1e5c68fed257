//! Case domain model: the entity, its parties, accounts and document history.

pub mod types;

pub use types::{
    Account, Activity, ApprovalSnapshot, Case, Comment, DocumentLink, EntityData, Party,
    RelatedPartyLink, ReviewEvent, RiskLevel, StageApproval, Submission, SubmissionMethod,
    party_by_id,
};
