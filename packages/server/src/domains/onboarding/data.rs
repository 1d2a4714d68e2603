//! GraphQL data types for onboarding checklists

use chrono::{DateTime, Utc};
use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::onboarding::models::{ChecklistItem, OnboardingTask};

/// GraphQL type for an onboarding task template
#[derive(Debug, Clone, GraphQLObject)]
pub struct OnboardingTaskData {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub audience: String,
    pub sort_order: i32,
    pub active: bool,
}

impl From<OnboardingTask> for OnboardingTaskData {
    fn from(t: OnboardingTask) -> Self {
        Self {
            id: t.id.into_uuid(),
            title: t.title,
            description: t.description,
            audience: t.audience,
            sort_order: t.sort_order,
            active: t.active,
        }
    }
}

/// GraphQL type for one checklist row (task + completion state)
#[derive(Debug, Clone, GraphQLObject)]
pub struct ChecklistItemData {
    pub task_id: Uuid,
    pub title: String,
    pub description: String,
    pub audience: String,
    pub sort_order: i32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<Uuid>,
}

impl From<ChecklistItem> for ChecklistItemData {
    fn from(item: ChecklistItem) -> Self {
        Self {
            task_id: item.id.into_uuid(),
            title: item.title,
            description: item.description,
            audience: item.audience,
            sort_order: item.sort_order,
            completed: item.completed_at.is_some(),
            completed_at: item.completed_at,
            completed_by: item.completed_by.map(|id| id.into_uuid()),
        }
    }
}

/// Input for creating or updating an onboarding task (admin)
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct OnboardingTaskInput {
    pub title: String,
    pub description: String,
    /// all, field, or office
    pub audience: String,
    pub sort_order: i32,
    pub active: Option<bool>,
}
