//! GraphQL query resolvers for commissions and draw requests

use juniper::FieldResult;
use tracing::info;

use crate::common::CommissionId;
use crate::domains::commissions::data::{CommissionData, DrawRequestData};
use crate::domains::commissions::models::{Commission, DrawRequest};
use crate::server::graphql::context::GraphQLContext;

/// The caller's own commission submissions, newest first
pub async fn my_commissions(ctx: &GraphQLContext) -> FieldResult<Vec<CommissionData>> {
    let employee_id = ctx.state().require_auth()?;

    let commissions = Commission::find_by_submitter(employee_id, &ctx.db_pool).await?;
    Ok(commissions.into_iter().map(CommissionData::from).collect())
}

/// Commissions awaiting review, oldest first (reviewer only)
pub async fn pending_commissions(
    ctx: &GraphQLContext,
    limit: Option<i32>,
) -> FieldResult<Vec<CommissionData>> {
    info!("pending_commissions query called");
    ctx.state().require_reviewer()?;

    let limit = limit.unwrap_or(20).clamp(1, 100) as i64;
    let commissions = Commission::find_pending_review(limit, &ctx.db_pool).await?;
    Ok(commissions.into_iter().map(CommissionData::from).collect())
}

/// A single commission. Submitters see their own; reviewers see all.
pub async fn commission(ctx: &GraphQLContext, id: String) -> FieldResult<Option<CommissionData>> {
    let employee_id = ctx.state().require_auth()?;

    let commission_id = CommissionId::parse(&id)?;
    let Some(commission) = Commission::find_by_id_optional(commission_id, &ctx.db_pool).await?
    else {
        return Ok(None);
    };

    if commission.submitted_by != employee_id && !ctx.state().is_reviewer() {
        return Err(juniper::FieldError::new(
            "Unauthorized: not your submission",
            juniper::Value::null(),
        ));
    }

    Ok(Some(CommissionData::from(commission)))
}

/// Draw requests on one commission, oldest first
pub async fn draw_requests(
    ctx: &GraphQLContext,
    commission_id: String,
) -> FieldResult<Vec<DrawRequestData>> {
    let employee_id = ctx.state().require_auth()?;

    let commission_id = CommissionId::parse(&commission_id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;
    if commission.submitted_by != employee_id && !ctx.state().is_reviewer() {
        return Err(juniper::FieldError::new(
            "Unauthorized: not your submission",
            juniper::Value::null(),
        ));
    }

    let draws = DrawRequest::find_by_commission(commission_id, &ctx.db_pool).await?;
    Ok(draws.into_iter().map(DrawRequestData::from).collect())
}

/// Draw requests awaiting a decision, oldest first (reviewer only)
pub async fn pending_draw_requests(
    ctx: &GraphQLContext,
    limit: Option<i32>,
) -> FieldResult<Vec<DrawRequestData>> {
    ctx.state().require_reviewer()?;

    let limit = limit.unwrap_or(20).clamp(1, 100) as i64;
    let draws = DrawRequest::find_requested(limit, &ctx.db_pool).await?;
    Ok(draws.into_iter().map(DrawRequestData::from).collect())
}
