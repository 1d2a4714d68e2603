//! Email dispatch for status transitions.
//!
//! Dispatch runs after the triggering row is committed. The email function
//! is an external collaborator: a failed send is logged and swallowed, never
//! surfaced to the mutation that triggered it.

use tracing::{debug, error};

use crate::domains::commissions::models::Commission;
use crate::domains::employees::models::Employee;
use crate::domains::notifications::models::NotificationSettings;
use crate::domains::requests::models::EmployeeRequest;
use crate::domains::warranties::models::WarrantyRequest;
use crate::kernel::ServerDeps;

/// New or resubmitted commission: tell every reviewer who wants review mail.
pub async fn notify_commission_submitted(commission: &Commission, deps: &ServerDeps) {
    let reviewers = match Employee::find_reviewers(&deps.db_pool).await {
        Ok(reviewers) => reviewers,
        Err(e) => {
            error!(error = %e, "Failed to load reviewers for commission notification");
            return;
        }
    };

    let subject = format!("Commission submitted: {}", commission.job_name);
    let body = format!(
        "A commission for job \"{}\" ({}) is waiting for review.",
        commission.job_name, commission.customer_name
    );

    for reviewer in reviewers {
        send_if_enabled(deps, &reviewer, Channel::Review, &subject, &body).await;
    }
}

/// Approve / revision decision: tell the submitter.
pub async fn notify_commission_reviewed(commission: &Commission, deps: &ServerDeps) {
    let submitter = match Employee::find_by_id_optional(commission.submitted_by, &deps.db_pool).await
    {
        Ok(Some(submitter)) => submitter,
        Ok(None) => return,
        Err(e) => {
            error!(error = %e, "Failed to load submitter for commission notification");
            return;
        }
    };

    let (subject, body) = match commission.status.as_str() {
        "approved" => (
            format!("Commission approved: {}", commission.job_name),
            format!(
                "Your commission for \"{}\" was approved.",
                commission.job_name
            ),
        ),
        "revision_required" => (
            format!("Commission needs revision: {}", commission.job_name),
            format!(
                "Your commission for \"{}\" was sent back: {}",
                commission.job_name,
                commission.rejection_reason.as_deref().unwrap_or("(no reason given)")
            ),
        ),
        _ => return,
    };

    send_if_enabled(deps, &submitter, Channel::Review, &subject, &body).await;
}

/// Request decision (approved / rejected / needs info): tell the submitter.
pub async fn notify_request_reviewed(request: &EmployeeRequest, deps: &ServerDeps) {
    let submitter = match Employee::find_by_id_optional(request.submitted_by, &deps.db_pool).await {
        Ok(Some(submitter)) => submitter,
        Ok(None) => return,
        Err(e) => {
            error!(error = %e, "Failed to load submitter for request notification");
            return;
        }
    };

    let (subject, body) = match request.status.as_str() {
        "approved" => (
            format!("Request approved: {}", request.title),
            format!("Your request \"{}\" was approved.", request.title),
        ),
        "rejected" => (
            format!("Request rejected: {}", request.title),
            format!(
                "Your request \"{}\" was rejected: {}",
                request.title,
                request.rejection_reason.as_deref().unwrap_or("(no reason given)")
            ),
        ),
        "needs_info" => (
            format!("More information needed: {}", request.title),
            format!(
                "Your request \"{}\" needs more information: {}",
                request.title,
                request
                    .info_requested_note
                    .as_deref()
                    .unwrap_or("(no note given)")
            ),
        ),
        _ => return,
    };

    send_if_enabled(deps, &submitter, Channel::Review, &subject, &body).await;
}

/// Warranty assignment: tell the assignee.
pub async fn notify_warranty_assigned(warranty: &WarrantyRequest, deps: &ServerDeps) {
    let Some(assignee_id) = warranty.assigned_to else {
        return;
    };
    let assignee = match Employee::find_by_id_optional(assignee_id, &deps.db_pool).await {
        Ok(Some(assignee)) => assignee,
        Ok(None) => return,
        Err(e) => {
            error!(error = %e, "Failed to load assignee for warranty notification");
            return;
        }
    };

    let subject = format!("Warranty assigned: {}", warranty.customer_name);
    let body = format!(
        "You were assigned the warranty request for {} at {}.\n\nIssue: {}",
        warranty.customer_name, warranty.property_address, warranty.issue
    );

    send_if_enabled(deps, &assignee, Channel::Warranty, &subject, &body).await;
}

enum Channel {
    Review,
    Warranty,
}

async fn send_if_enabled(
    deps: &ServerDeps,
    employee: &Employee,
    channel: Channel,
    subject: &str,
    body: &str,
) {
    let settings = match NotificationSettings::get_or_default(employee.id, &deps.db_pool).await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, employee_id = %employee.id, "Failed to load notification settings");
            return;
        }
    };

    let enabled = match channel {
        Channel::Review => settings.review_emails,
        Channel::Warranty => settings.warranty_emails,
    };
    if !enabled {
        debug!(employee_id = %employee.id, "Notification suppressed by settings");
        return;
    }

    if let Err(e) = deps.mailer.send(&employee.email, subject, body).await {
        error!(error = %e, employee_id = %employee.id, "Failed to send notification email");
    }
}
