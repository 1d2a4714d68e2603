//! GraphQL data types for notification settings

use juniper::{GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::notifications::models::NotificationSettings;

/// GraphQL type for notification settings
#[derive(Debug, Clone, GraphQLObject)]
pub struct NotificationSettingsData {
    pub employee_id: Uuid,
    pub review_emails: bool,
    pub warranty_emails: bool,
    pub feed_emails: bool,
}

impl From<NotificationSettings> for NotificationSettingsData {
    fn from(s: NotificationSettings) -> Self {
        Self {
            employee_id: s.employee_id.into_uuid(),
            review_emails: s.review_emails,
            warranty_emails: s.warranty_emails,
            feed_emails: s.feed_emails,
        }
    }
}

/// Input for updating notification settings
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct NotificationSettingsInput {
    pub review_emails: bool,
    pub warranty_emails: bool,
    pub feed_emails: bool,
}
