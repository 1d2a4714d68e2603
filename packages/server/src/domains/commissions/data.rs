//! GraphQL data types for commissions and draw requests

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::commissions::models::{Commission, DrawRequest};

/// Commission status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum CommissionStatusData {
    Draft,
    PendingReview,
    RevisionRequired,
    Approved,
    Paid,
}

impl From<&str> for CommissionStatusData {
    fn from(s: &str) -> Self {
        match s {
            "draft" => CommissionStatusData::Draft,
            "revision_required" => CommissionStatusData::RevisionRequired,
            "approved" => CommissionStatusData::Approved,
            "paid" => CommissionStatusData::Paid,
            _ => CommissionStatusData::PendingReview,
        }
    }
}

/// Draw request status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum DrawStatusData {
    Requested,
    Approved,
    Denied,
    Paid,
}

impl From<&str> for DrawStatusData {
    fn from(s: &str) -> Self {
        match s {
            "approved" => DrawStatusData::Approved,
            "denied" => DrawStatusData::Denied,
            "paid" => DrawStatusData::Paid,
            _ => DrawStatusData::Requested,
        }
    }
}

/// GraphQL type for a commission submission.
/// Money fields are decimal strings to avoid float rounding.
#[derive(Debug, Clone, GraphQLObject)]
pub struct CommissionData {
    pub id: Uuid,
    pub job_name: String,
    pub customer_name: String,
    pub contract_total: String,
    pub commission_amount: String,
    pub status: CommissionStatusData,
    pub rejection_reason: Option<String>,
    pub submitted_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Commission> for CommissionData {
    fn from(c: Commission) -> Self {
        Self {
            id: c.id.into_uuid(),
            job_name: c.job_name,
            customer_name: c.customer_name,
            contract_total: c.contract_total.to_string(),
            commission_amount: c.commission_amount.to_string(),
            status: CommissionStatusData::from(c.status.as_str()),
            rejection_reason: c.rejection_reason,
            submitted_by: c.submitted_by.into_uuid(),
            reviewed_by: c.reviewed_by.map(|id| id.into_uuid()),
            submitted_at: c.submitted_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// GraphQL type for a draw request
#[derive(Debug, Clone, GraphQLObject)]
pub struct DrawRequestData {
    pub id: Uuid,
    pub commission_id: Uuid,
    pub amount: String,
    pub status: DrawStatusData,
    pub notes: Option<String>,
    pub requested_by: Uuid,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<DrawRequest> for DrawRequestData {
    fn from(d: DrawRequest) -> Self {
        Self {
            id: d.id.into_uuid(),
            commission_id: d.commission_id.into_uuid(),
            amount: d.amount.to_string(),
            status: DrawStatusData::from(d.status.as_str()),
            notes: d.notes,
            requested_by: d.requested_by.into_uuid(),
            decided_by: d.decided_by.map(|id| id.into_uuid()),
            decided_at: d.decided_at,
            paid_at: d.paid_at,
            created_at: d.created_at,
        }
    }
}

/// Input for submitting a commission.
/// Amounts are decimal strings (e.g. "12500.00").
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitCommissionInput {
    pub job_name: String,
    pub customer_name: String,
    pub contract_total: String,
    pub commission_amount: String,
    /// Save as a draft instead of submitting for review.
    pub as_draft: Option<bool>,
}

/// Input for requesting a draw against an approved commission
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct RequestDrawInput {
    pub commission_id: String,
    pub amount: String,
    pub notes: Option<String>,
}
