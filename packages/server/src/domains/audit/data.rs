//! GraphQL data types for the audit log

use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use uuid::Uuid;

use crate::common::{Cursor, PageInfo};
use crate::domains::audit::models::AuditLog;

/// GraphQL type for an audit entry
#[derive(Debug, Clone, GraphQLObject)]
pub struct AuditEntryData {
    pub id: Uuid,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    /// Detail payload as a JSON string
    pub detail: String,
    pub created_at: DateTime<Utc>,
    pub cursor: String,
}

impl From<AuditLog> for AuditEntryData {
    fn from(entry: AuditLog) -> Self {
        Self {
            cursor: Cursor::encode_uuid(entry.id.into_uuid()),
            id: entry.id.into_uuid(),
            actor_id: entry.actor_id.map(|id| id.into_uuid()),
            action: entry.action,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            detail: entry.detail.to_string(),
            created_at: entry.created_at,
        }
    }
}

/// Paginated audit connection
#[derive(Debug, Clone, GraphQLObject)]
pub struct AuditConnection {
    pub nodes: Vec<AuditEntryData>,
    pub page_info: PageInfo,
}
