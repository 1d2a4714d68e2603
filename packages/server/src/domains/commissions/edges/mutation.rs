//! GraphQL mutation resolvers for commissions and draw requests.
//!
//! Status changes run through the transition tables in `machines.rs`;
//! a mutation that would skip a state fails before touching the database.

use std::str::FromStr;

use juniper::{FieldError, FieldResult};
use rust_decimal::Decimal;
use tracing::info;

use crate::common::{CommissionId, DrawRequestId};
use crate::domains::audit::models::AuditLog;
use crate::domains::commissions::data::{
    CommissionData, DrawRequestData, RequestDrawInput, SubmitCommissionInput,
};
use crate::domains::commissions::machines::{
    CommissionAction, CommissionStatus, DrawAction, DrawStatus,
};
use crate::domains::commissions::models::{Commission, DrawRequest};
use crate::domains::notifications::effects;
use crate::server::graphql::context::GraphQLContext;

fn parse_amount(s: &str, field: &str) -> FieldResult<Decimal> {
    let amount = Decimal::from_str(s)
        .map_err(|_| FieldError::new(format!("{} is not a valid amount", field), juniper::Value::null()))?;
    if amount <= Decimal::ZERO {
        return Err(FieldError::new(
            format!("{} must be positive", field),
            juniper::Value::null(),
        ));
    }
    Ok(amount)
}

/// Submit a commission for review (or save it as a draft)
pub async fn submit_commission(
    ctx: &GraphQLContext,
    input: SubmitCommissionInput,
) -> FieldResult<CommissionData> {
    info!("submit_commission mutation called: {}", input.job_name);
    let employee_id = ctx.state().require_auth()?;

    let contract_total = parse_amount(&input.contract_total, "contract_total")?;
    let commission_amount = parse_amount(&input.commission_amount, "commission_amount")?;

    let status = if input.as_draft.unwrap_or(false) {
        CommissionStatus::Draft
    } else {
        CommissionStatus::PendingReview
    };

    let commission = Commission::create(
        &input.job_name,
        &input.customer_name,
        contract_total,
        commission_amount,
        status,
        employee_id,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(employee_id),
        "commission.submitted",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::json!({ "job_name": commission.job_name, "status": commission.status }),
        &ctx.db_pool,
    )
    .await?;

    if status == CommissionStatus::PendingReview {
        effects::notify_commission_submitted(&commission, ctx.deps()).await;
        ctx.deps().pending_review.refresh_now();
    }

    Ok(CommissionData::from(commission))
}

/// Submit a saved draft for review
pub async fn submit_commission_draft(
    ctx: &GraphQLContext,
    id: String,
) -> FieldResult<CommissionData> {
    let employee_id = ctx.state().require_auth()?;

    let commission_id = CommissionId::parse(&id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;
    if commission.submitted_by != employee_id {
        return Err(FieldError::new(
            "Unauthorized: not your submission",
            juniper::Value::null(),
        ));
    }

    CommissionStatus::from_str(&commission.status)?.next_status(CommissionAction::Submit)?;
    let commission = Commission::mark_submitted(commission_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(employee_id),
        "commission.submitted",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::json!({ "job_name": commission.job_name }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_commission_submitted(&commission, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(CommissionData::from(commission))
}

/// Resubmit after a revision request. Restarts the SLA clock.
pub async fn resubmit_commission(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
    info!("resubmit_commission mutation called: {}", id);
    let employee_id = ctx.state().require_auth()?;

    let commission_id = CommissionId::parse(&id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;
    if commission.submitted_by != employee_id {
        return Err(FieldError::new(
            "Unauthorized: not your submission",
            juniper::Value::null(),
        ));
    }

    CommissionStatus::from_str(&commission.status)?.next_status(CommissionAction::Resubmit)?;
    let commission = Commission::mark_resubmitted(commission_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(employee_id),
        "commission.resubmitted",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    effects::notify_commission_submitted(&commission, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(CommissionData::from(commission))
}

/// Approve a pending commission (reviewer only)
pub async fn approve_commission(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
    info!("approve_commission mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    let commission_id = CommissionId::parse(&id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;

    CommissionStatus::from_str(&commission.status)?.next_status(CommissionAction::Approve)?;
    let commission = Commission::mark_approved(commission_id, reviewer_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "commission.approved",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::json!({ "submitted_by": commission.submitted_by }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_commission_reviewed(&commission, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(CommissionData::from(commission))
}

/// Send a pending commission back for revision (reviewer only)
pub async fn request_commission_revision(
    ctx: &GraphQLContext,
    id: String,
    reason: String,
) -> FieldResult<CommissionData> {
    info!("request_commission_revision mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    if reason.trim().is_empty() {
        return Err(FieldError::new(
            "A revision reason is required",
            juniper::Value::null(),
        ));
    }

    let commission_id = CommissionId::parse(&id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;

    CommissionStatus::from_str(&commission.status)?
        .next_status(CommissionAction::RequestRevision)?;
    let commission =
        Commission::mark_revision_required(commission_id, reviewer_id, &reason, &ctx.db_pool)
            .await?;

    AuditLog::record(
        Some(reviewer_id),
        "commission.revision_requested",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::json!({ "reason": reason }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_commission_reviewed(&commission, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(CommissionData::from(commission))
}

/// Mark an approved commission as paid out (admin only)
pub async fn mark_commission_paid(ctx: &GraphQLContext, id: String) -> FieldResult<CommissionData> {
    info!("mark_commission_paid mutation called: {}", id);
    let admin_id = ctx.state().require_admin()?;

    let commission_id = CommissionId::parse(&id)?;
    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;

    CommissionStatus::from_str(&commission.status)?.next_status(CommissionAction::MarkPaid)?;
    let commission = Commission::mark_paid(commission_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(admin_id),
        "commission.paid",
        "commission",
        Some(commission.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(CommissionData::from(commission))
}

/// Request a draw against an approved commission
pub async fn request_draw(
    ctx: &GraphQLContext,
    input: RequestDrawInput,
) -> FieldResult<DrawRequestData> {
    info!("request_draw mutation called: {}", input.commission_id);
    let employee_id = ctx.state().require_auth()?;

    let commission_id = CommissionId::parse(&input.commission_id)?;
    let amount = parse_amount(&input.amount, "amount")?;

    let commission = Commission::find_by_id(commission_id, &ctx.db_pool).await?;
    if commission.submitted_by != employee_id {
        return Err(FieldError::new(
            "Unauthorized: not your commission",
            juniper::Value::null(),
        ));
    }
    if CommissionStatus::from_str(&commission.status)? != CommissionStatus::Approved {
        return Err(FieldError::new(
            "Draws can only be requested against approved commissions",
            juniper::Value::null(),
        ));
    }

    let outstanding = DrawRequest::total_outstanding(commission_id, &ctx.db_pool).await?;
    if outstanding + amount > commission.commission_amount {
        return Err(FieldError::new(
            "Draw total would exceed the commission amount",
            juniper::Value::null(),
        ));
    }

    let draw = DrawRequest::create(
        commission_id,
        amount,
        input.notes.as_deref(),
        employee_id,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(employee_id),
        "draw.requested",
        "draw_request",
        Some(draw.id.into_uuid()),
        serde_json::json!({ "commission_id": commission_id, "amount": amount.to_string() }),
        &ctx.db_pool,
    )
    .await?;

    Ok(DrawRequestData::from(draw))
}

async fn decide_draw(
    ctx: &GraphQLContext,
    id: String,
    action: DrawAction,
    notes: Option<String>,
    audit_action: &str,
) -> FieldResult<DrawRequestData> {
    let reviewer_id = ctx.state().require_reviewer()?;

    let draw_id = DrawRequestId::parse(&id)?;
    let draw = DrawRequest::find_by_id(draw_id, &ctx.db_pool).await?;

    let next = DrawStatus::from_str(&draw.status)?.next_status(action)?;
    let draw = DrawRequest::mark_decided(
        draw_id,
        &next.to_string(),
        reviewer_id,
        notes.as_deref(),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(reviewer_id),
        audit_action,
        "draw_request",
        Some(draw.id.into_uuid()),
        serde_json::json!({ "commission_id": draw.commission_id }),
        &ctx.db_pool,
    )
    .await?;

    Ok(DrawRequestData::from(draw))
}

/// Approve a draw request (reviewer only)
pub async fn approve_draw(
    ctx: &GraphQLContext,
    id: String,
    notes: Option<String>,
) -> FieldResult<DrawRequestData> {
    info!("approve_draw mutation called: {}", id);
    decide_draw(ctx, id, DrawAction::Approve, notes, "draw.approved").await
}

/// Deny a draw request (reviewer only)
pub async fn deny_draw(
    ctx: &GraphQLContext,
    id: String,
    notes: Option<String>,
) -> FieldResult<DrawRequestData> {
    info!("deny_draw mutation called: {}", id);
    decide_draw(ctx, id, DrawAction::Deny, notes, "draw.denied").await
}

/// Mark an approved draw as paid out (admin only)
pub async fn mark_draw_paid(ctx: &GraphQLContext, id: String) -> FieldResult<DrawRequestData> {
    info!("mark_draw_paid mutation called: {}", id);
    let admin_id = ctx.state().require_admin()?;

    let draw_id = DrawRequestId::parse(&id)?;
    let draw = DrawRequest::find_by_id(draw_id, &ctx.db_pool).await?;

    DrawStatus::from_str(&draw.status)?.next_status(DrawAction::MarkPaid)?;
    let draw = DrawRequest::mark_paid(draw_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(admin_id),
        "draw.paid",
        "draw_request",
        Some(draw.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(DrawRequestData::from(draw))
}
