//! Commission and draw-request lifecycles as explicit state machines.
//!
//! Every status change in this domain goes through `next_status`: the
//! transition table is the single source of truth, and an invalid
//! `(status, action)` pair is a typed error rather than a silent no-op.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} a commission in status {status}")]
    Commission { status: String, action: String },
    #[error("cannot {action} a draw request in status {status}")]
    Draw { status: String, action: String },
}

// ============================================================================
// Commission lifecycle
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    Draft,
    PendingReview,
    RevisionRequired,
    Approved,
    Paid,
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionStatus::Draft => write!(f, "draft"),
            CommissionStatus::PendingReview => write!(f, "pending_review"),
            CommissionStatus::RevisionRequired => write!(f, "revision_required"),
            CommissionStatus::Approved => write!(f, "approved"),
            CommissionStatus::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for CommissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "draft" => Ok(CommissionStatus::Draft),
            "pending_review" => Ok(CommissionStatus::PendingReview),
            "revision_required" => Ok(CommissionStatus::RevisionRequired),
            "approved" => Ok(CommissionStatus::Approved),
            "paid" => Ok(CommissionStatus::Paid),
            _ => Err(anyhow::anyhow!("Invalid commission status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionAction {
    /// Submitter sends a draft in for review.
    Submit,
    /// Submitter sends a revised submission back in. Restarts the SLA clock.
    Resubmit,
    /// Reviewer accepts the submission.
    Approve,
    /// Reviewer sends the submission back with a reason.
    RequestRevision,
    /// Payroll marks the approved commission paid out.
    MarkPaid,
}

impl CommissionAction {
    fn name(&self) -> &'static str {
        match self {
            CommissionAction::Submit => "submit",
            CommissionAction::Resubmit => "resubmit",
            CommissionAction::Approve => "approve",
            CommissionAction::RequestRevision => "request revision on",
            CommissionAction::MarkPaid => "mark paid",
        }
    }
}

impl CommissionStatus {
    /// The transition table for commission submissions.
    pub fn next_status(self, action: CommissionAction) -> Result<Self, TransitionError> {
        use CommissionAction as A;
        use CommissionStatus as S;

        match (self, action) {
            (S::Draft, A::Submit) => Ok(S::PendingReview),
            (S::RevisionRequired, A::Resubmit) => Ok(S::PendingReview),
            (S::PendingReview, A::Approve) => Ok(S::Approved),
            (S::PendingReview, A::RequestRevision) => Ok(S::RevisionRequired),
            (S::Approved, A::MarkPaid) => Ok(S::Paid),
            (status, action) => Err(TransitionError::Commission {
                status: status.to_string(),
                action: action.name().to_string(),
            }),
        }
    }
}

// ============================================================================
// Draw-request lifecycle
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrawStatus {
    Requested,
    Approved,
    Denied,
    Paid,
}

impl std::fmt::Display for DrawStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawStatus::Requested => write!(f, "requested"),
            DrawStatus::Approved => write!(f, "approved"),
            DrawStatus::Denied => write!(f, "denied"),
            DrawStatus::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for DrawStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "requested" => Ok(DrawStatus::Requested),
            "approved" => Ok(DrawStatus::Approved),
            "denied" => Ok(DrawStatus::Denied),
            "paid" => Ok(DrawStatus::Paid),
            _ => Err(anyhow::anyhow!("Invalid draw status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawAction {
    Approve,
    Deny,
    MarkPaid,
}

impl DrawAction {
    fn name(&self) -> &'static str {
        match self {
            DrawAction::Approve => "approve",
            DrawAction::Deny => "deny",
            DrawAction::MarkPaid => "mark paid",
        }
    }
}

impl DrawStatus {
    /// The transition table for draw requests.
    pub fn next_status(self, action: DrawAction) -> Result<Self, TransitionError> {
        use DrawAction as A;
        use DrawStatus as S;

        match (self, action) {
            (S::Requested, A::Approve) => Ok(S::Approved),
            (S::Requested, A::Deny) => Ok(S::Denied),
            (S::Approved, A::MarkPaid) => Ok(S::Paid),
            (status, action) => Err(TransitionError::Draw {
                status: status.to_string(),
                action: action.name().to_string(),
            }),
        }
    }
}
