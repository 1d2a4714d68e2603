//! GraphQL data types for the pending-review worklist

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLObject};
use uuid::Uuid;

use crate::domains::pending_review::aggregator::{PendingReview, ReviewCounts};
use crate::domains::pending_review::models::{
    ItemKind, Priority, RequiresAction, ReviewableItem, SlaStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum ItemKindData {
    Commission,
    Request,
    Warranty,
}

impl From<ItemKind> for ItemKindData {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Commission => ItemKindData::Commission,
            ItemKind::Request => ItemKindData::Request,
            ItemKind::Warranty => ItemKindData::Warranty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum PriorityData {
    High,
    Medium,
    Low,
}

impl From<Priority> for PriorityData {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::High => PriorityData::High,
            Priority::Medium => PriorityData::Medium,
            Priority::Low => PriorityData::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum RequiresActionData {
    Review,
    Revision,
    InfoNeeded,
}

impl From<RequiresAction> for RequiresActionData {
    fn from(action: RequiresAction) -> Self {
        match action {
            RequiresAction::Review => RequiresActionData::Review,
            RequiresAction::Revision => RequiresActionData::Revision,
            RequiresAction::InfoNeeded => RequiresActionData::InfoNeeded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum SlaStatusData {
    Overdue,
    DueToday,
    DueTomorrow,
    OnTrack,
}

impl From<SlaStatus> for SlaStatusData {
    fn from(status: SlaStatus) -> Self {
        match status {
            SlaStatus::Overdue => SlaStatusData::Overdue,
            SlaStatus::DueToday => SlaStatusData::DueToday,
            SlaStatus::DueTomorrow => SlaStatusData::DueTomorrow,
            SlaStatus::OnTrack => SlaStatusData::OnTrack,
        }
    }
}

/// GraphQL type for one worklist entry
#[derive(Debug, Clone, GraphQLObject)]
pub struct ReviewableItemData {
    pub id: Uuid,
    pub kind: ItemKindData,
    pub title: String,
    pub subtitle: String,
    pub status: String,
    pub priority: PriorityData,
    pub requires_action: RequiresActionData,
    pub submitted_at: DateTime<Utc>,
    pub rejection_reason: Option<String>,
    pub submitted_by: Option<Uuid>,
    pub age_days: i32,
    /// ISO date (YYYY-MM-DD)
    pub sla_due_at: String,
    pub sla_status: SlaStatusData,
}

impl From<ReviewableItem> for ReviewableItemData {
    fn from(item: ReviewableItem) -> Self {
        Self {
            id: item.id,
            kind: ItemKindData::from(item.kind),
            title: item.title,
            subtitle: item.subtitle,
            status: item.status,
            priority: PriorityData::from(item.priority),
            requires_action: RequiresActionData::from(item.requires_action),
            submitted_at: item.submitted_at,
            rejection_reason: item.rejection_reason,
            submitted_by: item.submitted_by.map(|id| id.into_uuid()),
            age_days: item.age_days as i32,
            sla_due_at: item.sla_due_at.to_string(),
            sla_status: SlaStatusData::from(item.sla_status),
        }
    }
}

/// Per-type tallies
#[derive(Debug, Clone, GraphQLObject)]
pub struct ReviewCountsData {
    pub commissions: i32,
    pub requests: i32,
    pub warranties: i32,
    pub total: i32,
}

impl From<ReviewCounts> for ReviewCountsData {
    fn from(c: ReviewCounts) -> Self {
        Self {
            commissions: c.commissions,
            requests: c.requests,
            warranties: c.warranties,
            total: c.total,
        }
    }
}

/// The worklist result shape consumed by the dashboard
#[derive(Debug, Clone, GraphQLObject)]
pub struct PendingReviewData {
    pub items: Vec<ReviewableItemData>,
    pub counts: ReviewCountsData,
}

impl From<PendingReview> for PendingReviewData {
    fn from(review: PendingReview) -> Self {
        Self {
            items: review
                .items
                .into_iter()
                .map(ReviewableItemData::from)
                .collect(),
            counts: ReviewCountsData::from(review.counts),
        }
    }
}
