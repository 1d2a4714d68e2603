//! GraphQL data types for warranty requests

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::warranties::models::WarrantyRequest;

/// Warranty status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum WarrantyStatusData {
    New,
    Assigned,
    InReview,
    Scheduled,
    InProgress,
    WaitingOnMaterials,
    WaitingOnManufacturer,
    Resolved,
    Closed,
    Cancelled,
}

impl From<&str> for WarrantyStatusData {
    fn from(s: &str) -> Self {
        match s {
            "assigned" => WarrantyStatusData::Assigned,
            "in_review" => WarrantyStatusData::InReview,
            "scheduled" => WarrantyStatusData::Scheduled,
            "in_progress" => WarrantyStatusData::InProgress,
            "waiting_on_materials" => WarrantyStatusData::WaitingOnMaterials,
            "waiting_on_manufacturer" => WarrantyStatusData::WaitingOnManufacturer,
            "resolved" => WarrantyStatusData::Resolved,
            "closed" => WarrantyStatusData::Closed,
            "cancelled" => WarrantyStatusData::Cancelled,
            _ => WarrantyStatusData::New,
        }
    }
}

impl WarrantyStatusData {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyStatusData::New => "new",
            WarrantyStatusData::Assigned => "assigned",
            WarrantyStatusData::InReview => "in_review",
            WarrantyStatusData::Scheduled => "scheduled",
            WarrantyStatusData::InProgress => "in_progress",
            WarrantyStatusData::WaitingOnMaterials => "waiting_on_materials",
            WarrantyStatusData::WaitingOnManufacturer => "waiting_on_manufacturer",
            WarrantyStatusData::Resolved => "resolved",
            WarrantyStatusData::Closed => "closed",
            WarrantyStatusData::Cancelled => "cancelled",
        }
    }
}

/// Intake priority for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum WarrantyPriorityData {
    Low,
    Medium,
    High,
    Urgent,
    Emergency,
}

impl WarrantyPriorityData {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarrantyPriorityData::Low => "low",
            WarrantyPriorityData::Medium => "medium",
            WarrantyPriorityData::High => "high",
            WarrantyPriorityData::Urgent => "urgent",
            WarrantyPriorityData::Emergency => "emergency",
        }
    }
}

impl From<&str> for WarrantyPriorityData {
    fn from(s: &str) -> Self {
        match s {
            "medium" => WarrantyPriorityData::Medium,
            "high" => WarrantyPriorityData::High,
            "urgent" => WarrantyPriorityData::Urgent,
            "emergency" => WarrantyPriorityData::Emergency,
            _ => WarrantyPriorityData::Low,
        }
    }
}

/// GraphQL type for a warranty request
#[derive(Debug, Clone, GraphQLObject)]
pub struct WarrantyData {
    pub id: Uuid,
    pub customer_name: String,
    pub property_address: String,
    pub issue: String,
    pub priority_level: WarrantyPriorityData,
    pub status: WarrantyStatusData,
    pub date_submitted: Option<DateTime<Utc>>,
    pub assigned_to: Option<Uuid>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WarrantyRequest> for WarrantyData {
    fn from(w: WarrantyRequest) -> Self {
        Self {
            id: w.id.into_uuid(),
            customer_name: w.customer_name,
            property_address: w.property_address,
            issue: w.issue,
            priority_level: WarrantyPriorityData::from(w.priority_level.as_str()),
            status: WarrantyStatusData::from(w.status.as_str()),
            date_submitted: w.date_submitted,
            assigned_to: w.assigned_to.map(|id| id.into_uuid()),
            scheduled_for: w.scheduled_for,
            resolution: w.resolution,
            created_by: w.created_by.into_uuid(),
            created_at: w.created_at,
            updated_at: w.updated_at,
        }
    }
}

/// Input for creating a warranty request
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateWarrantyInput {
    pub customer_name: String,
    pub property_address: String,
    pub issue: String,
    pub priority_level: WarrantyPriorityData,
}
