//! GraphQL query resolvers for the audit log (admin only; the log is
//! append-only, so there are no mutations here)

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{build_page_info, trim_results, EmployeeId, PaginationArgs};
use crate::domains::audit::data::{AuditConnection, AuditEntryData};
use crate::domains::audit::models::AuditLog;
use crate::server::graphql::context::GraphQLContext;

/// Recent audit entries, newest first, cursor-paginated
pub async fn audit_entries(
    ctx: &GraphQLContext,
    first: Option<i32>,
    after: Option<String>,
) -> FieldResult<AuditConnection> {
    info!("audit_entries query called");
    ctx.state().require_admin()?;

    let args = PaginationArgs {
        first,
        after,
        last: None,
        before: None,
    };
    let validated = args
        .validate()
        .map_err(|e| FieldError::new(e, juniper::Value::null()))?;

    let rows = AuditLog::find_paginated(&validated, &ctx.db_pool).await?;
    let (rows, has_more) = trim_results(rows, validated.limit);

    let nodes: Vec<AuditEntryData> = rows.into_iter().map(AuditEntryData::from).collect();
    let page_info = build_page_info(
        has_more,
        &validated,
        nodes.first().map(|n| n.cursor.clone()),
        nodes.last().map(|n| n.cursor.clone()),
    );

    Ok(AuditConnection { nodes, page_info })
}

/// Audit trail for one entity, oldest first
pub async fn audit_trail(
    ctx: &GraphQLContext,
    entity_type: String,
    entity_id: String,
) -> FieldResult<Vec<AuditEntryData>> {
    ctx.state().require_admin()?;

    let entity_id = uuid::Uuid::parse_str(&entity_id)?;
    let rows = AuditLog::find_for_entity(&entity_type, entity_id, &ctx.db_pool).await?;
    Ok(rows.into_iter().map(AuditEntryData::from).collect())
}

/// Entries recorded by one actor, newest first
pub async fn audit_by_actor(
    ctx: &GraphQLContext,
    actor_id: String,
    limit: Option<i32>,
) -> FieldResult<Vec<AuditEntryData>> {
    ctx.state().require_admin()?;

    let actor = EmployeeId::parse(&actor_id)?;
    let limit = limit.unwrap_or(50).clamp(1, 200) as i64;
    let rows = AuditLog::find_by_actor(actor, limit, &ctx.db_pool).await?;
    Ok(rows.into_iter().map(AuditEntryData::from).collect())
}
