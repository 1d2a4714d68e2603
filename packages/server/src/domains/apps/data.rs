//! GraphQL data types for app governance

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::apps::models::{App, AppAssignment};

/// App lifecycle status for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum AppStatusData {
    Active,
    Pilot,
    Deprecated,
}

impl AppStatusData {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppStatusData::Active => "active",
            AppStatusData::Pilot => "pilot",
            AppStatusData::Deprecated => "deprecated",
        }
    }
}

impl From<&str> for AppStatusData {
    fn from(s: &str) -> Self {
        match s {
            "pilot" => AppStatusData::Pilot,
            "deprecated" => AppStatusData::Deprecated,
            _ => AppStatusData::Active,
        }
    }
}

/// GraphQL type for a catalog app
#[derive(Debug, Clone, GraphQLObject)]
pub struct AppData {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub category: String,
    pub owner_id: Option<Uuid>,
    pub status: AppStatusData,
    pub created_at: DateTime<Utc>,
}

impl From<App> for AppData {
    fn from(app: App) -> Self {
        Self {
            id: app.id.into_uuid(),
            name: app.name,
            url: app.url,
            category: app.category,
            owner_id: app.owner_id.map(|id| id.into_uuid()),
            status: AppStatusData::from(app.status.as_str()),
            created_at: app.created_at,
        }
    }
}

/// GraphQL type for an app assignment
#[derive(Debug, Clone, GraphQLObject)]
pub struct AppAssignmentData {
    pub id: Uuid,
    pub app_id: Uuid,
    pub employee_id: Uuid,
    pub granted_by: Uuid,
    pub granted_at: DateTime<Utc>,
}

impl From<AppAssignment> for AppAssignmentData {
    fn from(a: AppAssignment) -> Self {
        Self {
            id: a.id.into_uuid(),
            app_id: a.app_id.into_uuid(),
            employee_id: a.employee_id.into_uuid(),
            granted_by: a.granted_by.into_uuid(),
            granted_at: a.granted_at,
        }
    }
}

/// Input for creating or updating a catalog app (admin)
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct AppInput {
    pub name: String,
    pub url: String,
    pub category: String,
    pub owner_id: Option<String>,
    pub status: AppStatusData,
}
