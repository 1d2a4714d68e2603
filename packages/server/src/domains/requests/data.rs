//! GraphQL data types for employee requests

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::requests::models::EmployeeRequest;

/// Request status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum RequestStatusData {
    Pending,
    NeedsInfo,
    Approved,
    Rejected,
    Closed,
}

impl From<&str> for RequestStatusData {
    fn from(s: &str) -> Self {
        match s {
            "needs_info" => RequestStatusData::NeedsInfo,
            "approved" => RequestStatusData::Approved,
            "rejected" => RequestStatusData::Rejected,
            "closed" => RequestStatusData::Closed,
            _ => RequestStatusData::Pending,
        }
    }
}

/// Request category for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum RequestCategoryData {
    It,
    Hr,
    Facilities,
    Other,
}

impl RequestCategoryData {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestCategoryData::It => "it",
            RequestCategoryData::Hr => "hr",
            RequestCategoryData::Facilities => "facilities",
            RequestCategoryData::Other => "other",
        }
    }
}

impl From<&str> for RequestCategoryData {
    fn from(s: &str) -> Self {
        match s {
            "it" => RequestCategoryData::It,
            "hr" => RequestCategoryData::Hr,
            "facilities" => RequestCategoryData::Facilities,
            _ => RequestCategoryData::Other,
        }
    }
}

/// GraphQL type for an employee request
#[derive(Debug, Clone, GraphQLObject)]
pub struct RequestData {
    pub id: Uuid,
    pub category: RequestCategoryData,
    pub title: String,
    pub description: String,
    pub status: RequestStatusData,
    pub info_requested_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub submitted_by: Uuid,
    pub reviewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EmployeeRequest> for RequestData {
    fn from(r: EmployeeRequest) -> Self {
        Self {
            id: r.id.into_uuid(),
            category: RequestCategoryData::from(r.category.as_str()),
            title: r.title,
            description: r.description,
            status: RequestStatusData::from(r.status.as_str()),
            info_requested_note: r.info_requested_note,
            rejection_reason: r.rejection_reason,
            submitted_by: r.submitted_by.into_uuid(),
            reviewed_by: r.reviewed_by.map(|id| id.into_uuid()),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Input for submitting a request
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct SubmitRequestInput {
    pub category: RequestCategoryData,
    pub title: String,
    pub description: String,
}
