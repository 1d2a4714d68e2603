//! Integration tests for the pending-review worklist engine.
//!
//! The shared database is visible to every test in the run, so assertions
//! are membership- and consistency-based rather than exact-set: the fixed
//! dated scenarios live in the unit tests next to the SLA code.

mod common;

use chrono::{Duration, Utc};
use common::*;
use serde_json::json;
use server_core::common::AppState;
use server_core::domains::commissions::models::Commission;
use server_core::domains::employees::models::EmployeeRole;
use server_core::domains::pending_review::aggregator::aggregate;
use server_core::domains::pending_review::{ItemKind, Priority, RequiresAction, SlaStatus};
use server_core::domains::requests::models::EmployeeRequest;
use test_context::test_context;

fn reviewer_state(id: server_core::common::EmployeeId) -> AppState {
    AppState::authenticated(id, false, true)
}

fn standard_state(id: server_core::common::EmployeeId) -> AppState {
    AppState::authenticated(id, false, false)
}

#[test_context(TestHarness)]
#[tokio::test]
async fn reviewer_sees_all_three_sources(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub One", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr One", EmployeeRole::Manager)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Ridge Cap Job")
        .await
        .unwrap();
    let request_id = create_pending_request(pool, submitter, "New ladder")
        .await
        .unwrap();
    let warranty_id = create_warranty(pool, submitter, "Alvarez", "emergency")
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let review = aggregate(&reviewer_state(manager), today, pool)
        .await
        .unwrap();

    let commission = review
        .items
        .iter()
        .find(|i| i.id == commission_id.into_uuid())
        .expect("commission in worklist");
    assert_eq!(commission.kind, ItemKind::Commission);
    assert_eq!(commission.requires_action, RequiresAction::Review);
    assert_eq!(commission.priority, Priority::High);

    let request = review
        .items
        .iter()
        .find(|i| i.id == request_id.into_uuid())
        .expect("request in worklist");
    assert_eq!(request.kind, ItemKind::Request);
    assert_eq!(request.priority, Priority::Medium);

    let warranty = review
        .items
        .iter()
        .find(|i| i.id == warranty_id.into_uuid())
        .expect("warranty in worklist");
    assert_eq!(warranty.kind, ItemKind::Warranty);
    // Emergency collapses to high.
    assert_eq!(warranty.priority, Priority::High);

    // Counts agree with the item list.
    let commissions = review
        .items
        .iter()
        .filter(|i| i.kind == ItemKind::Commission)
        .count() as i32;
    assert_eq!(review.counts.commissions, commissions);
    assert_eq!(review.counts.total, review.items.len() as i32);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn worklist_is_sorted_by_sla_then_priority_then_age(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Two", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr Two", EmployeeRole::Manager)
        .await
        .unwrap();

    // Two weeks old: overdue whatever day the test runs on.
    let overdue_id = create_pending_commission(pool, submitter, "Old Tearoff")
        .await
        .unwrap();
    let old = Utc::now() - Duration::days(14);
    backdate_commission(pool, overdue_id, old, old).await.unwrap();

    // Fresh commission: allowance 2 business days, never overdue today.
    let fresh_id = create_pending_commission(pool, submitter, "Fresh Tearoff")
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let review = aggregate(&reviewer_state(manager), today, pool)
        .await
        .unwrap();

    // Global invariant over the whole output.
    for pair in review.items.windows(2) {
        assert!(
            pair[0].sort_key() <= pair[1].sort_key(),
            "worklist out of order"
        );
    }

    let pos_overdue = review
        .items
        .iter()
        .position(|i| i.id == overdue_id.into_uuid())
        .expect("overdue item present");
    let pos_fresh = review
        .items
        .iter()
        .position(|i| i.id == fresh_id.into_uuid())
        .expect("fresh item present");
    assert_eq!(
        review.items[pos_overdue].sla_status,
        SlaStatus::Overdue
    );
    assert!(review.items[pos_overdue].age_days >= 9);
    assert!(pos_overdue < pos_fresh, "overdue must sort before on-track");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn standard_user_sees_only_items_awaiting_them(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Three", EmployeeRole::Standard)
        .await
        .unwrap();
    let other = create_employee(pool, "Sub Four", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr Three", EmployeeRole::Manager)
        .await
        .unwrap();

    // A commission bounced back to the submitter.
    let bounced_id = create_pending_commission(pool, submitter, "Bounced Job")
        .await
        .unwrap();
    Commission::mark_revision_required(bounced_id, manager, "Missing photos", pool)
        .await
        .unwrap();

    // A request sent back for info, and one rejected.
    let info_id = create_pending_request(pool, submitter, "Truck repair")
        .await
        .unwrap();
    EmployeeRequest::mark_needs_info(info_id, manager, "Which truck?", pool)
        .await
        .unwrap();
    let rejected_id = create_pending_request(pool, submitter, "Espresso machine")
        .await
        .unwrap();
    EmployeeRequest::mark_rejected(rejected_id, manager, "No budget", pool)
        .await
        .unwrap();

    // Noise: someone else's pending items must not appear.
    create_pending_commission(pool, other, "Other Job").await.unwrap();
    create_pending_request(pool, other, "Other request").await.unwrap();

    let today = Utc::now().date_naive();
    let review = aggregate(&standard_state(submitter), today, pool)
        .await
        .unwrap();

    assert_eq!(review.counts.total, 3);
    assert_eq!(review.counts.commissions, 1);
    assert_eq!(review.counts.requests, 2);
    assert_eq!(review.counts.warranties, 0);

    // Role partition: a standard user never sees Review items.
    assert!(review
        .items
        .iter()
        .all(|i| i.requires_action != RequiresAction::Review));

    let bounced = review
        .items
        .iter()
        .find(|i| i.id == bounced_id.into_uuid())
        .unwrap();
    assert_eq!(bounced.requires_action, RequiresAction::Revision);
    assert_eq!(bounced.priority, Priority::High);
    assert_eq!(bounced.rejection_reason.as_deref(), Some("Missing photos"));

    let info = review
        .items
        .iter()
        .find(|i| i.id == info_id.into_uuid())
        .unwrap();
    assert_eq!(info.requires_action, RequiresAction::InfoNeeded);
    assert_eq!(info.priority, Priority::Medium);

    let rejected = review
        .items
        .iter()
        .find(|i| i.id == rejected_id.into_uuid())
        .unwrap();
    assert_eq!(rejected.requires_action, RequiresAction::Revision);
    assert_eq!(rejected.priority, Priority::High);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn aggregation_is_idempotent_for_a_standard_user(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Five", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr Five", EmployeeRole::Manager)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Repeat Job")
        .await
        .unwrap();
    Commission::mark_revision_required(commission_id, manager, "Wrong total", pool)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let first = aggregate(&standard_state(submitter), today, pool)
        .await
        .unwrap();
    let second = aggregate(&standard_state(submitter), today, pool)
        .await
        .unwrap();

    let first_ids: Vec<_> = first.items.iter().map(|i| i.id).collect();
    let second_ids: Vec<_> = second.items.iter().map(|i| i.id).collect();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.counts, second.counts);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn anonymous_caller_gets_empty_result_not_error(ctx: &TestHarness) {
    let pool = &ctx.db_pool;

    let today = Utc::now().date_naive();
    let review = aggregate(&AppState::anonymous(), today, pool).await.unwrap();
    assert!(review.items.is_empty());
    assert_eq!(review.counts.total, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn approved_commission_leaves_the_review_queue(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Six", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr Six", EmployeeRole::Manager)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Approve Me")
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let before = aggregate(&reviewer_state(manager), today, pool)
        .await
        .unwrap();
    assert!(before
        .items
        .iter()
        .any(|i| i.id == commission_id.into_uuid()));

    Commission::mark_approved(commission_id, manager, pool)
        .await
        .unwrap();

    let after = aggregate(&reviewer_state(manager), today, pool)
        .await
        .unwrap();
    assert!(!after.items.iter().any(|i| i.id == commission_id.into_uuid()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn warranty_without_date_submitted_falls_back_to_created_at(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Seven", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Mgr Seven", EmployeeRole::Manager)
        .await
        .unwrap();

    let warranty_id = create_warranty(pool, submitter, "Nguyen", "medium")
        .await
        .unwrap();
    // Legacy import shape: no submission date.
    set_warranty_date_submitted(pool, warranty_id, None)
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let review = aggregate(&reviewer_state(manager), today, pool)
        .await
        .unwrap();

    let item = review
        .items
        .iter()
        .find(|i| i.id == warranty_id.into_uuid())
        .expect("warranty still aggregates");
    assert_eq!(item.submitted_at, item.created_at);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn pending_review_query_resolves_for_reviewer(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Sub Eight", EmployeeRole::Standard)
        .await
        .unwrap();
    let admin = create_employee(pool, "Adm Eight", EmployeeRole::Admin)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "GraphQL Job")
        .await
        .unwrap();

    let client = GraphQLClient::as_employee(pool.clone(), admin, true, false);
    let result = client
        .execute(
            r#"
            query {
                pendingReview {
                    items { id kind requiresAction slaStatus ageDays }
                    counts { commissions requests warranties total }
                }
            }
            "#,
            juniper::Variables::new(),
        )
        .await;

    let data = result.unwrap();
    let items = data["pendingReview"]["items"].as_array().unwrap();
    assert!(items
        .iter()
        .any(|i| i["id"] == json!(commission_id.into_uuid().to_string())));
    assert!(data["pendingReview"]["counts"]["total"].as_i64().unwrap() >= 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn pending_review_query_is_empty_for_anonymous(ctx: &TestHarness) {
    let client = ctx.graphql();
    let result = client
        .execute(
            r#"query { pendingReview { items { id } counts { total } } }"#,
            juniper::Variables::new(),
        )
        .await;

    let data = result.unwrap();
    assert_eq!(data["pendingReview"]["counts"]["total"], json!(0));
    assert!(data["pendingReview"]["items"].as_array().unwrap().is_empty());
}
