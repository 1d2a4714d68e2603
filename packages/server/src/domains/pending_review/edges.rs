//! GraphQL resolvers for the pending-review worklist

use chrono::Utc;
use juniper::FieldResult;
use tracing::info;

use crate::domains::pending_review::aggregator;
use crate::domains::pending_review::data::PendingReviewData;
use crate::server::graphql::context::GraphQLContext;

/// The caller's worklist, computed fresh for this request.
///
/// Unauthenticated callers get an empty list rather than an error; the
/// dashboard polls this on a 60-second interval and after mutations.
pub async fn pending_review(ctx: &GraphQLContext) -> FieldResult<PendingReviewData> {
    info!("pending_review query called");

    let today = Utc::now().date_naive();
    let review = aggregator::aggregate(&ctx.state(), today, &ctx.db_pool).await?;
    Ok(PendingReviewData::from(review))
}
