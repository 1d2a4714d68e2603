//! GraphQL query resolvers for warranty requests

use juniper::FieldResult;
use tracing::info;

use crate::common::WarrantyId;
use crate::domains::warranties::data::WarrantyData;
use crate::domains::warranties::models::WarrantyRequest;
use crate::server::graphql::context::GraphQLContext;

/// Open warranty requests, oldest first
pub async fn open_warranties(
    ctx: &GraphQLContext,
    limit: Option<i32>,
) -> FieldResult<Vec<WarrantyData>> {
    info!("open_warranties query called");
    ctx.state().require_auth()?;

    let limit = limit.unwrap_or(50).clamp(1, 200) as i64;
    let warranties = WarrantyRequest::find_open(limit, &ctx.db_pool).await?;
    Ok(warranties.into_iter().map(WarrantyData::from).collect())
}

/// Open warranty requests assigned to the caller
pub async fn my_assigned_warranties(ctx: &GraphQLContext) -> FieldResult<Vec<WarrantyData>> {
    let employee_id = ctx.state().require_auth()?;

    let warranties = WarrantyRequest::find_assigned_to(employee_id, &ctx.db_pool).await?;
    Ok(warranties.into_iter().map(WarrantyData::from).collect())
}

/// A single warranty request
pub async fn warranty(ctx: &GraphQLContext, id: String) -> FieldResult<Option<WarrantyData>> {
    ctx.state().require_auth()?;

    let warranty_id = WarrantyId::parse(&id)?;
    let warranty = WarrantyRequest::find_by_id_optional(warranty_id, &ctx.db_pool).await?;
    Ok(warranty.map(WarrantyData::from))
}
