//! GraphQL schema definition.

use chrono::{DateTime, Utc};
use juniper::{EmptySubscription, FieldResult, RootNode};

use super::context::GraphQLContext;

// Domain edges (resolvers)
use crate::domains::apps::edges as app_edges;
use crate::domains::audit::edges as audit_edges;
use crate::domains::commissions::edges as commission_edges;
use crate::domains::employees::edges as employee_edges;
use crate::domains::feed::edges as feed_edges;
use crate::domains::notifications::edges as notification_edges;
use crate::domains::onboarding::edges as onboarding_edges;
use crate::domains::pending_review::edges as pending_review_edges;
use crate::domains::requests::edges as request_edges;
use crate::domains::warranties::edges as warranty_edges;

// Domain data types (GraphQL types)
use crate::domains::apps::data::{AppAssignmentData, AppData, AppInput};
use crate::domains::audit::data::{AuditConnection, AuditEntryData};
use crate::domains::commissions::data::{
    CommissionData, DrawRequestData, RequestDrawInput, SubmitCommissionInput,
};
use crate::domains::employees::data::{CreateEmployeeInput, EmployeeData, UpdateEmployeeInput};
use crate::domains::feed::data::{FeedConnection, FeedPostData};
use crate::domains::notifications::data::{NotificationSettingsData, NotificationSettingsInput};
use crate::domains::onboarding::data::{
    ChecklistItemData, OnboardingTaskData, OnboardingTaskInput,
};
use crate::domains::pending_review::data::PendingReviewData;
use crate::domains::requests::data::{RequestData, SubmitRequestInput};
use crate::domains::warranties::data::{CreateWarrantyInput, WarrantyData, WarrantyStatusData};

pub struct Query;

#[juniper::graphql_object(context = GraphQLContext)]
impl Query {
    // =========================================================================
    // Directory
    // =========================================================================

    /// The authenticated caller's own directory entry
    async fn me(ctx: &GraphQLContext) -> FieldResult<Option<EmployeeData>> {
        employee_edges::me(ctx).await
    }

    /// Active employee directory (reviewer only)
    async fn employees(ctx: &GraphQLContext) -> FieldResult<Vec<EmployeeData>> {
        employee_edges::employees(ctx).await
    }

    /// Single employee by ID (reviewer only)
    async fn employee(ctx: &GraphQLContext, id: String) -> FieldResult<Option<EmployeeData>> {
        employee_edges::employee(ctx, id).await
    }

    // =========================================================================
    // Pending review (the worklist)
    // =========================================================================

    /// The caller's prioritized worklist with SLA annotations and counts.
    /// Reviewers see the review queues; standard users see their own items
    /// needing action.
    async fn pending_review(ctx: &GraphQLContext) -> FieldResult<PendingReviewData> {
        pending_review_edges::pending_review(ctx).await
    }

    // =========================================================================
    // Commissions
    // =========================================================================

    /// The caller's own commission submissions
    async fn my_commissions(ctx: &GraphQLContext) -> FieldResult<Vec<CommissionData>> {
        commission_edges::my_commissions(ctx).await
    }

    /// Commissions awaiting review, oldest first (reviewer only)
    async fn pending_commissions(
        ctx: &GraphQLContext,
        limit: Option<i32>,
    ) -> FieldResult<Vec<CommissionData>> {
        commission_edges::pending_commissions(ctx, limit).await
    }

    /// A single commission
    async fn commission(ctx: &GraphQLContext, id: String) -> FieldResult<Option<CommissionData>> {
        commission_edges::commission(ctx, id).await
    }

    /// Draw requests on one commission
    async fn draw_requests(
        ctx: &GraphQLContext,
        commission_id: String,
    ) -> FieldResult<Vec<DrawRequestData>> {
        commission_edges::draw_requests(ctx, commission_id).await
    }

    /// Draw requests awaiting a decision (reviewer only)
    async fn pending_draw_requests(
        ctx: &GraphQLContext,
        limit: Option<i32>,
    ) -> FieldResult<Vec<DrawRequestData>> {
        commission_edges::pending_draw_requests(ctx, limit).await
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// The caller's own requests
    async fn my_requests(ctx: &GraphQLContext) -> FieldResult<Vec<RequestData>> {
        request_edges::my_requests(ctx).await
    }

    /// Requests awaiting review, oldest first (reviewer only)
    async fn pending_requests(
        ctx: &GraphQLContext,
        limit: Option<i32>,
    ) -> FieldResult<Vec<RequestData>> {
        request_edges::pending_requests(ctx, limit).await
    }

    /// A single request
    async fn request(ctx: &GraphQLContext, id: String) -> FieldResult<Option<RequestData>> {
        request_edges::request(ctx, id).await
    }

    // =========================================================================
    // Warranties
    // =========================================================================

    /// Open warranty requests, oldest first
    async fn open_warranties(
        ctx: &GraphQLContext,
        limit: Option<i32>,
    ) -> FieldResult<Vec<WarrantyData>> {
        warranty_edges::open_warranties(ctx, limit).await
    }

    /// Open warranty requests assigned to the caller
    async fn my_assigned_warranties(ctx: &GraphQLContext) -> FieldResult<Vec<WarrantyData>> {
        warranty_edges::my_assigned_warranties(ctx).await
    }

    /// A single warranty request
    async fn warranty(ctx: &GraphQLContext, id: String) -> FieldResult<Option<WarrantyData>> {
        warranty_edges::warranty(ctx, id).await
    }

    // =========================================================================
    // Feed
    // =========================================================================

    /// The company feed, pinned posts first, cursor-paginated
    async fn feed(
        ctx: &GraphQLContext,
        first: Option<i32>,
        after: Option<String>,
    ) -> FieldResult<FeedConnection> {
        feed_edges::feed(ctx, first, after).await
    }

    // =========================================================================
    // App governance
    // =========================================================================

    /// The app catalog
    async fn app_catalog(ctx: &GraphQLContext) -> FieldResult<Vec<AppData>> {
        app_edges::app_catalog(ctx).await
    }

    /// Apps assigned to the caller
    async fn my_apps(ctx: &GraphQLContext) -> FieldResult<Vec<AppData>> {
        app_edges::my_apps(ctx).await
    }

    /// Active assignments for one app (admin only)
    async fn app_assignments(
        ctx: &GraphQLContext,
        app_id: String,
    ) -> FieldResult<Vec<AppAssignmentData>> {
        app_edges::app_assignments(ctx, app_id).await
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    /// The caller's onboarding checklist
    async fn my_onboarding_checklist(ctx: &GraphQLContext) -> FieldResult<Vec<ChecklistItemData>> {
        onboarding_edges::my_onboarding_checklist(ctx).await
    }

    /// Another employee's checklist (reviewer only)
    async fn onboarding_checklist(
        ctx: &GraphQLContext,
        employee_id: String,
    ) -> FieldResult<Vec<ChecklistItemData>> {
        onboarding_edges::onboarding_checklist(ctx, employee_id).await
    }

    // =========================================================================
    // Audit log
    // =========================================================================

    /// Recent audit entries, cursor-paginated (admin only)
    async fn audit_entries(
        ctx: &GraphQLContext,
        first: Option<i32>,
        after: Option<String>,
    ) -> FieldResult<AuditConnection> {
        audit_edges::audit_entries(ctx, first, after).await
    }

    /// Audit trail for one entity (admin only)
    async fn audit_trail(
        ctx: &GraphQLContext,
        entity_type: String,
        entity_id: String,
    ) -> FieldResult<Vec<AuditEntryData>> {
        audit_edges::audit_trail(ctx, entity_type, entity_id).await
    }

    /// Audit entries recorded by one actor (admin only)
    async fn audit_by_actor(
        ctx: &GraphQLContext,
        actor_id: String,
        limit: Option<i32>,
    ) -> FieldResult<Vec<AuditEntryData>> {
        audit_edges::audit_by_actor(ctx, actor_id, limit).await
    }

    // =========================================================================
    // Notification settings
    // =========================================================================

    /// The caller's notification settings
    async fn my_notification_settings(
        ctx: &GraphQLContext,
    ) -> FieldResult<NotificationSettingsData> {
        notification_edges::my_notification_settings(ctx).await
    }
}

pub struct Mutation;

#[juniper::graphql_object(context = GraphQLContext)]
impl Mutation {
    // =========================================================================
    // Directory (admin)
    // =========================================================================

    async fn create_employee(
        ctx: &GraphQLContext,
        input: CreateEmployeeInput,
    ) -> FieldResult<EmployeeData> {
        employee_edges::create_employee(ctx, input).await
    }

    async fn update_employee(
        ctx: &GraphQLContext,
        id: String,
        input: UpdateEmployeeInput,
    ) -> FieldResult<EmployeeData> {
        employee_edges::update_employee(ctx, id, input).await
    }

    async fn deactivate_employee(ctx: &GraphQLContext, id: String) -> FieldResult<EmployeeData> {
        employee_edges::deactivate_employee(ctx, id).await
    }

    async fn reactivate_employee(ctx: &GraphQLContext, id: String) -> FieldResult<EmployeeData> {
        employee_edges::reactivate_employee(ctx, id).await
    }

    // =========================================================================
    // Commissions
    // =========================================================================

    async fn submit_commission(
        ctx: &GraphQLContext,
        input: SubmitCommissionInput,
    ) -> FieldResult<CommissionData> {
        commission_edges::submit_commission(ctx, input).await
    }

    async fn submit_commission_draft(
        ctx: &GraphQLContext,
        id: String,
    ) -> FieldResult<CommissionData> {
        commission_edges::submit_commission_draft(ctx, id).await
    }

    async fn resubmit_commission(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
        commission_edges::resubmit_commission(ctx, id).await
    }

    async fn approve_commission(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
        commission_edges::approve_commission(ctx, id).await
    }

    async fn request_commission_revision(
        ctx: &GraphQLContext,
        id: String,
        reason: String,
    ) -> FieldResult<CommissionData> {
        commission_edges::request_commission_revision(ctx, id, reason).await
    }

    async fn mark_commission_paid(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
        commission_edges::mark_commission_paid(ctx, id).await
    }

    // =========================================================================
    // Draw requests
    // =========================================================================

    async fn request_draw(
        ctx: &GraphQLContext,
        input: RequestDrawInput,
    ) -> FieldResult<DrawRequestData> {
        commission_edges::request_draw(ctx, input).await
    }

    async fn approve_draw(
        ctx: &GraphQLContext,
        id: String,
        notes: Option<String>,
    ) -> FieldResult<DrawRequestData> {
        commission_edges::approve_draw(ctx, id, notes).await
    }

    async fn deny_draw(
        ctx: &GraphQLContext,
        id: String,
        notes: Option<String>,
    ) -> FieldResult<DrawRequestData> {
        commission_edges::deny_draw(ctx, id, notes).await
    }

    async fn mark_draw_paid(ctx: &GraphQLContext, id: String) -> FieldResult<DrawRequestData> {
        commission_edges::mark_draw_paid(ctx, id).await
    }

    // =========================================================================
    // Requests
    // =========================================================================

    async fn submit_request(
        ctx: &GraphQLContext,
        input: SubmitRequestInput,
    ) -> FieldResult<RequestData> {
        request_edges::submit_request(ctx, input).await
    }

    async fn request_more_info(
        ctx: &GraphQLContext,
        id: String,
        note: String,
    ) -> FieldResult<RequestData> {
        request_edges::request_more_info(ctx, id, note).await
    }

    async fn provide_request_info(
        ctx: &GraphQLContext,
        id: String,
        info: String,
    ) -> FieldResult<RequestData> {
        request_edges::provide_request_info(ctx, id, info).await
    }

    async fn approve_request(ctx: &GraphQLContext, id: String) -> FieldResult<RequestData> {
        request_edges::approve_request(ctx, id).await
    }

    async fn reject_request(
        ctx: &GraphQLContext,
        id: String,
        reason: String,
    ) -> FieldResult<RequestData> {
        request_edges::reject_request(ctx, id, reason).await
    }

    async fn close_request(ctx: &GraphQLContext, id: String) -> FieldResult<RequestData> {
        request_edges::close_request(ctx, id).await
    }

    // =========================================================================
    // Warranties
    // =========================================================================

    async fn create_warranty(
        ctx: &GraphQLContext,
        input: CreateWarrantyInput,
    ) -> FieldResult<WarrantyData> {
        warranty_edges::create_warranty(ctx, input).await
    }

    async fn assign_warranty(
        ctx: &GraphQLContext,
        id: String,
        assignee_id: String,
    ) -> FieldResult<WarrantyData> {
        warranty_edges::assign_warranty(ctx, id, assignee_id).await
    }

    async fn schedule_warranty(
        ctx: &GraphQLContext,
        id: String,
        scheduled_for: DateTime<Utc>,
    ) -> FieldResult<WarrantyData> {
        warranty_edges::schedule_warranty(ctx, id, scheduled_for).await
    }

    async fn update_warranty_status(
        ctx: &GraphQLContext,
        id: String,
        status: WarrantyStatusData,
    ) -> FieldResult<WarrantyData> {
        warranty_edges::update_warranty_status(ctx, id, status).await
    }

    async fn resolve_warranty(
        ctx: &GraphQLContext,
        id: String,
        resolution: String,
    ) -> FieldResult<WarrantyData> {
        warranty_edges::resolve_warranty(ctx, id, resolution).await
    }

    async fn close_warranty(ctx: &GraphQLContext, id: String) -> FieldResult<WarrantyData> {
        warranty_edges::close_warranty(ctx, id).await
    }

    async fn cancel_warranty(ctx: &GraphQLContext, id: String) -> FieldResult<WarrantyData> {
        warranty_edges::cancel_warranty(ctx, id).await
    }

    // =========================================================================
    // Feed
    // =========================================================================

    async fn publish_post(ctx: &GraphQLContext, body: String) -> FieldResult<FeedPostData> {
        feed_edges::publish_post(ctx, body).await
    }

    async fn edit_post(ctx: &GraphQLContext, id: String, body: String) -> FieldResult<FeedPostData> {
        feed_edges::edit_post(ctx, id, body).await
    }

    async fn delete_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
        feed_edges::delete_post(ctx, id).await
    }

    async fn pin_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
        feed_edges::pin_post(ctx, id).await
    }

    async fn unpin_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
        feed_edges::unpin_post(ctx, id).await
    }

    // =========================================================================
    // App governance (admin)
    // =========================================================================

    async fn create_app(ctx: &GraphQLContext, input: AppInput) -> FieldResult<AppData> {
        app_edges::create_app(ctx, input).await
    }

    async fn update_app(ctx: &GraphQLContext, id: String, input: AppInput) -> FieldResult<AppData> {
        app_edges::update_app(ctx, id, input).await
    }

    async fn assign_app(
        ctx: &GraphQLContext,
        app_id: String,
        employee_id: String,
    ) -> FieldResult<AppAssignmentData> {
        app_edges::assign_app(ctx, app_id, employee_id).await
    }

    async fn revoke_app(
        ctx: &GraphQLContext,
        app_id: String,
        employee_id: String,
    ) -> FieldResult<bool> {
        app_edges::revoke_app(ctx, app_id, employee_id).await
    }

    // =========================================================================
    // Onboarding
    // =========================================================================

    async fn create_onboarding_task(
        ctx: &GraphQLContext,
        input: OnboardingTaskInput,
    ) -> FieldResult<OnboardingTaskData> {
        onboarding_edges::create_onboarding_task(ctx, input).await
    }

    async fn update_onboarding_task(
        ctx: &GraphQLContext,
        id: String,
        input: OnboardingTaskInput,
    ) -> FieldResult<OnboardingTaskData> {
        onboarding_edges::update_onboarding_task(ctx, id, input).await
    }

    async fn complete_onboarding_task(
        ctx: &GraphQLContext,
        task_id: String,
        employee_id: Option<String>,
    ) -> FieldResult<bool> {
        onboarding_edges::complete_onboarding_task(ctx, task_id, employee_id).await
    }

    async fn reopen_onboarding_task(
        ctx: &GraphQLContext,
        task_id: String,
        employee_id: String,
    ) -> FieldResult<bool> {
        onboarding_edges::reopen_onboarding_task(ctx, task_id, employee_id).await
    }

    // =========================================================================
    // Notification settings
    // =========================================================================

    async fn update_notification_settings(
        ctx: &GraphQLContext,
        input: NotificationSettingsInput,
    ) -> FieldResult<NotificationSettingsData> {
        notification_edges::update_notification_settings(ctx, input).await
    }
}

pub type Schema = RootNode<'static, Query, Mutation, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}
