//! GraphQL resolvers for notification settings

use juniper::FieldResult;
use tracing::info;

use crate::domains::notifications::data::{NotificationSettingsData, NotificationSettingsInput};
use crate::domains::notifications::models::NotificationSettings;
use crate::server::graphql::context::GraphQLContext;

/// The caller's notification settings (defaults if never saved)
pub async fn my_notification_settings(
    ctx: &GraphQLContext,
) -> FieldResult<NotificationSettingsData> {
    let employee_id = ctx.state().require_auth()?;

    let settings = NotificationSettings::get_or_default(employee_id, &ctx.db_pool).await?;
    Ok(NotificationSettingsData::from(settings))
}

/// Update the caller's notification settings
pub async fn update_notification_settings(
    ctx: &GraphQLContext,
    input: NotificationSettingsInput,
) -> FieldResult<NotificationSettingsData> {
    info!("update_notification_settings mutation called");
    let employee_id = ctx.state().require_auth()?;

    let settings = NotificationSettings::upsert(
        employee_id,
        input.review_emails,
        input.warranty_emails,
        input.feed_emails,
        &ctx.db_pool,
    )
    .await?;

    Ok(NotificationSettingsData::from(settings))
}
