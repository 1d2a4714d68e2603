//! GraphQL query resolvers for employee requests

use juniper::FieldResult;
use tracing::info;

use crate::common::RequestId;
use crate::domains::requests::data::RequestData;
use crate::domains::requests::models::EmployeeRequest;
use crate::server::graphql::context::GraphQLContext;

/// The caller's own requests, newest first
pub async fn my_requests(ctx: &GraphQLContext) -> FieldResult<Vec<RequestData>> {
    let employee_id = ctx.state().require_auth()?;

    let requests = EmployeeRequest::find_by_submitter(employee_id, &ctx.db_pool).await?;
    Ok(requests.into_iter().map(RequestData::from).collect())
}

/// Requests awaiting review, oldest first (reviewer only)
pub async fn pending_requests(
    ctx: &GraphQLContext,
    limit: Option<i32>,
) -> FieldResult<Vec<RequestData>> {
    info!("pending_requests query called");
    ctx.state().require_reviewer()?;

    let limit = limit.unwrap_or(20).clamp(1, 100) as i64;
    let requests = EmployeeRequest::find_pending(limit, &ctx.db_pool).await?;
    Ok(requests.into_iter().map(RequestData::from).collect())
}

/// A single request. Submitters see their own; reviewers see all.
pub async fn request(ctx: &GraphQLContext, id: String) -> FieldResult<Option<RequestData>> {
    let employee_id = ctx.state().require_auth()?;

    let request_id = RequestId::parse(&id)?;
    let Some(request) = EmployeeRequest::find_by_id_optional(request_id, &ctx.db_pool).await?
    else {
        return Ok(None);
    };

    if request.submitted_by != employee_id && !ctx.state().is_reviewer() {
        return Err(juniper::FieldError::new(
            "Unauthorized: not your request",
            juniper::Value::null(),
        ));
    }

    Ok(Some(RequestData::from(request)))
}
