//! Query adapters and per-source mapping functions.
//!
//! Each source table gets one fetch adapter (bounded, oldest first) and one
//! pure mapping function into `ReviewableItem`. Derived SLA fields are
//! computed here from the caller-supplied `today`, never cached.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::common::EmployeeId;
use crate::domains::commissions::models::Commission;
use crate::domains::pending_review::models::{
    ItemKind, Priority, RequiresAction, ReviewableItem, SlaStatus,
};
use crate::domains::pending_review::sla;
use crate::domains::requests::models::EmployeeRequest;
use crate::domains::warranties::models::WarrantyRequest;

/// Per-source row bound. Keeps every aggregation at three bounded scans.
pub const SOURCE_LIMIT: i64 = 20;

#[allow(clippy::too_many_arguments)]
fn build_item(
    id: uuid::Uuid,
    kind: ItemKind,
    title: String,
    subtitle: String,
    status: String,
    priority: Priority,
    requires_action: RequiresAction,
    submitted_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    rejection_reason: Option<String>,
    submitted_by: Option<EmployeeId>,
    today: NaiveDate,
) -> ReviewableItem {
    let clock_start = submitted_at.date_naive();
    let allowance = sla::allowance_for(kind, requires_action);
    let sla_due_at = sla::add_business_days(clock_start, allowance);

    ReviewableItem {
        id,
        kind,
        title,
        subtitle,
        status,
        priority,
        requires_action,
        submitted_at,
        created_at,
        updated_at,
        rejection_reason,
        submitted_by,
        age_days: sla::business_days_between(clock_start, today),
        sla_due_at,
        sla_status: sla::sla_status_for(sla_due_at, today),
    }
}

// ============================================================================
// Reviewer-side mappings (requires_action = Review)
// ============================================================================

/// A commission waiting for review. Fixed high priority: money is on hold.
pub fn map_commission_review(c: &Commission, today: NaiveDate) -> ReviewableItem {
    build_item(
        c.id.into_uuid(),
        ItemKind::Commission,
        c.job_name.clone(),
        c.customer_name.clone(),
        c.status.clone(),
        Priority::High,
        RequiresAction::Review,
        c.submitted_at.unwrap_or(c.created_at),
        c.created_at,
        c.updated_at,
        None,
        Some(c.submitted_by),
        today,
    )
}

/// A generic request waiting for review. Fixed medium priority.
pub fn map_request_review(r: &EmployeeRequest, today: NaiveDate) -> ReviewableItem {
    build_item(
        r.id.into_uuid(),
        ItemKind::Request,
        r.title.clone(),
        r.category.clone(),
        r.status.clone(),
        Priority::Medium,
        RequiresAction::Review,
        r.created_at,
        r.created_at,
        r.updated_at,
        None,
        Some(r.submitted_by),
        today,
    )
}

/// An open warranty request. Priority collapses from the intake level;
/// a missing `date_submitted` falls back to `created_at`.
pub fn map_warranty_review(w: &WarrantyRequest, today: NaiveDate) -> ReviewableItem {
    build_item(
        w.id.into_uuid(),
        ItemKind::Warranty,
        w.customer_name.clone(),
        w.property_address.clone(),
        w.status.clone(),
        Priority::from_warranty_level(&w.priority_level),
        RequiresAction::Review,
        w.date_submitted.unwrap_or(w.created_at),
        w.created_at,
        w.updated_at,
        None,
        Some(w.created_by),
        today,
    )
}

// ============================================================================
// Submitter-side mappings (requires_action = Revision | InfoNeeded)
// ============================================================================

/// The caller's own commission bounced back for revision. The SLA clock
/// restarts on the bounce date (`updated_at`), not the original submission.
pub fn map_commission_revision(c: &Commission, today: NaiveDate) -> ReviewableItem {
    build_item(
        c.id.into_uuid(),
        ItemKind::Commission,
        c.job_name.clone(),
        c.customer_name.clone(),
        c.status.clone(),
        Priority::High,
        RequiresAction::Revision,
        c.updated_at,
        c.created_at,
        c.updated_at,
        c.rejection_reason.clone(),
        Some(c.submitted_by),
        today,
    )
}

/// The caller's own request waiting on them: `needs_info` wants information,
/// `rejected` wants a revised submission (and ranks high).
pub fn map_request_returned(r: &EmployeeRequest, today: NaiveDate) -> ReviewableItem {
    let (requires_action, priority) = if r.status == "needs_info" {
        (RequiresAction::InfoNeeded, Priority::Medium)
    } else {
        (RequiresAction::Revision, Priority::High)
    };

    build_item(
        r.id.into_uuid(),
        ItemKind::Request,
        r.title.clone(),
        r.category.clone(),
        r.status.clone(),
        priority,
        requires_action,
        r.updated_at,
        r.created_at,
        r.updated_at,
        r.rejection_reason.clone(),
        Some(r.submitted_by),
        today,
    )
}

// ============================================================================
// Fetch adapters
// ============================================================================

pub async fn fetch_commissions_for_review(pool: &PgPool) -> Result<Vec<Commission>> {
    Commission::find_pending_review(SOURCE_LIMIT, pool).await
}

pub async fn fetch_requests_for_review(pool: &PgPool) -> Result<Vec<EmployeeRequest>> {
    EmployeeRequest::find_pending(SOURCE_LIMIT, pool).await
}

pub async fn fetch_open_warranties(pool: &PgPool) -> Result<Vec<WarrantyRequest>> {
    WarrantyRequest::find_open(SOURCE_LIMIT, pool).await
}

pub async fn fetch_own_commission_revisions(
    employee_id: EmployeeId,
    pool: &PgPool,
) -> Result<Vec<Commission>> {
    Commission::find_revision_required_for(employee_id, SOURCE_LIMIT, pool).await
}

pub async fn fetch_own_returned_requests(
    employee_id: EmployeeId,
    pool: &PgPool,
) -> Result<Vec<EmployeeRequest>> {
    EmployeeRequest::find_awaiting_submitter(employee_id, SOURCE_LIMIT, pool).await
}
