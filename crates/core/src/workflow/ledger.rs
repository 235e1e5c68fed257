//! Applies document actions to a case.
//!
//! The ledger validates through `DocumentWorkflowService` and then appends
//! to the case's submission history and audit log. History is never
//! rewritten: a submission's stored status only moves forward through
//! reviews, each of which leaves a `ReviewEvent` behind.

use chrono::{DateTime, Months, NaiveDate, Utc};
use tracing::{debug, info};

use kyc_shared::types::{DocumentId, SubmissionId, UserId};

use crate::case::{Case, Comment, DocumentLink, ReviewEvent, Submission, SubmissionMethod};
use crate::checklist::{ChecklistItem, RequirementId};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::DocumentWorkflowService;
use crate::workflow::types::{DocumentStatus, UserRole};

/// Activity recorded when the RM attaches a submission.
pub const DOCUMENT_SUBMITTED: &str = "DOCUMENT_SUBMITTED";
/// Activity recorded when a reviewer approves a submission.
pub const DOCUMENT_APPROVED: &str = "DOCUMENT_APPROVED";
/// Activity recorded when a reviewer rejects a submission.
pub const DOCUMENT_REJECTED: &str = "DOCUMENT_REJECTED";
/// Activity recorded for a remark on a submission.
pub const DOCUMENT_COMMENTED: &str = "DOCUMENT_COMMENTED";

/// Input for a new submission.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    /// The uploaded or scanned document record.
    pub master_doc_id: DocumentId,
    /// Upload or scan.
    pub submission_method: SubmissionMethod,
    /// The document's issue date.
    pub published_date: Option<NaiveDate>,
    /// The document's expiry date, if printed on it.
    pub expiry_date: Option<NaiveDate>,
    /// Optional remark from the RM.
    pub remarks: Option<String>,
}

/// A reviewer's decision on a submission.
#[derive(Debug, Clone)]
pub enum ReviewDecision {
    /// Move to the next stage.
    Approve {
        /// Optional notes, stored as a comment.
        notes: Option<String>,
    },
    /// Send back to the RM.
    Reject {
        /// Mandatory reason, stored as a comment.
        reason: String,
    },
}

/// Stateless service appending document actions to a case.
pub struct SubmissionLedger;

impl SubmissionLedger {
    /// Attach a new submission to a checklist item.
    ///
    /// The item's presented status is checked, so an expired document can
    /// be replaced even though its stored status is still `Verified`. When
    /// no expiry date is given it is derived from the published date and
    /// the requirement's validity period.
    pub fn record_submission(
        case: &mut Case,
        item: &ChecklistItem,
        actor: UserId,
        role: UserRole,
        input: NewSubmission,
    ) -> Result<SubmissionId, WorkflowError> {
        let action = DocumentWorkflowService::submit(item.status, role, actor)?;
        let submitted_at = action.at();

        let expiry_date = input.expiry_date.or_else(|| {
            derive_expiry(input.published_date, item.requirement.validity_months)
        });

        let comments = input
            .remarks
            .filter(|r| !r.trim().is_empty())
            .map(|text| Comment {
                author: actor,
                role,
                timestamp: submitted_at,
                text,
            })
            .into_iter()
            .collect();

        let submission_id = SubmissionId::new();
        let submission = Submission {
            submission_id,
            master_doc_id: input.master_doc_id,
            status: action.new_status(),
            submitted_at,
            submitted_by: actor,
            submission_method: input.submission_method,
            comments,
            review_trail: Vec::new(),
            published_date: input.published_date,
            expiry_date,
        };

        match case.document_link_mut(&item.requirement_id) {
            Some(link) => link.submissions.push(submission),
            None => case.document_links.push(DocumentLink {
                requirement_id: item.requirement_id.clone(),
                submissions: vec![submission],
            }),
        }

        case.record_activity(
            actor,
            role,
            DOCUMENT_SUBMITTED,
            Some(format!("{} ({})", item.requirement.name, item.requirement_id)),
            submitted_at,
        );

        info!(
            case_id = %case.case_id,
            requirement_id = %item.requirement_id,
            submission_id = %submission_id,
            previous_status = %item.status,
            "document submitted"
        );

        Ok(submission_id)
    }

    /// Approve or reject the latest submission of a requirement.
    ///
    /// Returns the submission's new stored status.
    pub fn review(
        case: &mut Case,
        requirement_id: &RequirementId,
        submission_id: SubmissionId,
        decision: ReviewDecision,
        actor: UserId,
        role: UserRole,
    ) -> Result<DocumentStatus, WorkflowError> {
        let submission = latest_submission_mut(case, requirement_id, submission_id)?;

        let from = submission.status;
        let (action, activity) = match decision {
            ReviewDecision::Approve { notes } => (
                DocumentWorkflowService::approve(from, role, actor, notes)?,
                DOCUMENT_APPROVED,
            ),
            ReviewDecision::Reject { reason } => (
                DocumentWorkflowService::reject(from, role, actor, reason)?,
                DOCUMENT_REJECTED,
            ),
        };
        let to = action.new_status();
        let at = action.at();
        let remark = action.remark().map(str::to_string);

        apply_review(submission, from, to, actor, role, at, remark);

        case.record_activity(
            actor,
            role,
            activity,
            Some(format!("{requirement_id}: {from} -> {to}")),
            at,
        );

        info!(
            case_id = %case.case_id,
            requirement_id = %requirement_id,
            submission_id = %submission_id,
            %from,
            %to,
            %role,
            "document reviewed"
        );

        Ok(to)
    }

    /// Append a remark to any submission of a requirement.
    pub fn add_comment(
        case: &mut Case,
        requirement_id: &RequirementId,
        submission_id: SubmissionId,
        actor: UserId,
        role: UserRole,
        text: String,
    ) -> Result<(), WorkflowError> {
        let link = case
            .document_link_mut(requirement_id)
            .ok_or_else(|| WorkflowError::RequirementNotFound(requirement_id.clone()))?;
        let submission = link
            .submissions
            .iter_mut()
            .find(|s| s.submission_id == submission_id)
            .ok_or(WorkflowError::SubmissionNotFound(submission_id))?;

        let action = DocumentWorkflowService::comment(submission.status, role, actor, text)?;
        let at = action.at();
        if let Some(text) = action.remark() {
            submission.comments.push(Comment {
                author: actor,
                role,
                timestamp: at,
                text: text.to_string(),
            });
        }

        case.record_activity(
            actor,
            role,
            DOCUMENT_COMMENTED,
            Some(requirement_id.to_string()),
            at,
        );
        debug!(
            case_id = %case.case_id,
            requirement_id = %requirement_id,
            submission_id = %submission_id,
            "comment added"
        );

        Ok(())
    }
}

/// Expiry derived from the published date plus the validity period.
fn derive_expiry(published_date: Option<NaiveDate>, validity_months: Option<u32>) -> Option<NaiveDate> {
    let published = published_date?;
    let months = validity_months?;
    published.checked_add_months(Months::new(months))
}

/// Finds a submission that may still be reviewed: it must be the latest.
fn latest_submission_mut<'a>(
    case: &'a mut Case,
    requirement_id: &RequirementId,
    submission_id: SubmissionId,
) -> Result<&'a mut Submission, WorkflowError> {
    let link = case
        .document_link_mut(requirement_id)
        .ok_or_else(|| WorkflowError::RequirementNotFound(requirement_id.clone()))?;

    let position = link
        .submissions
        .iter()
        .position(|s| s.submission_id == submission_id)
        .ok_or(WorkflowError::SubmissionNotFound(submission_id))?;

    if position + 1 != link.submissions.len() {
        return Err(WorkflowError::StaleSubmission(submission_id));
    }

    Ok(&mut link.submissions[position])
}

fn apply_review(
    submission: &mut Submission,
    from: DocumentStatus,
    to: DocumentStatus,
    actor: UserId,
    role: UserRole,
    at: DateTime<Utc>,
    remark: Option<String>,
) {
    submission.review_trail.push(ReviewEvent {
        from,
        to,
        actor,
        role,
        at,
    });
    submission.status = to;
    if let Some(text) = remark {
        submission.comments.push(Comment {
            author: actor,
            role,
            timestamp: at,
            text,
        });
    }
}
