//! Integration tests for the commission and draw-request lifecycles.

mod common;

use common::*;
use serde_json::json;
use server_core::domains::audit::models::AuditLog;
use server_core::domains::employees::models::EmployeeRole;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn submit_and_approve_commission(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Crew Lead", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Sales Mgr", EmployeeRole::Manager)
        .await
        .unwrap();

    let submit_client = GraphQLClient::as_employee(pool.clone(), submitter, false, false);
    let result = submit_client
        .execute(
            r#"
            mutation {
                submitCommission(input: {
                    jobName: "Hail Damage Re-roof",
                    customerName: "Patel",
                    contractTotal: "21450.00",
                    commissionAmount: "2145.00"
                }) { id status }
            }
            "#,
            juniper::Variables::new(),
        )
        .await;
    let data = result.unwrap();
    assert_eq!(data["submitCommission"]["status"], json!("PENDING_REVIEW"));
    let id = data["submitCommission"]["id"].as_str().unwrap().to_string();

    // A standard user cannot approve.
    let denied = submit_client
        .execute(
            &format!(r#"mutation {{ approveCommission(id: "{}") {{ id }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert!(!denied.is_ok());

    let manager_client = GraphQLClient::as_employee(pool.clone(), manager, false, true);
    let approved = manager_client
        .execute(
            &format!(
                r#"mutation {{ approveCommission(id: "{}") {{ status reviewedBy }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = approved.unwrap();
    assert_eq!(data["approveCommission"]["status"], json!("APPROVED"));
    assert_eq!(
        data["approveCommission"]["reviewedBy"],
        json!(manager.into_uuid().to_string())
    );

    // Approving twice is an invalid transition.
    let again = manager_client
        .execute(
            &format!(r#"mutation {{ approveCommission(id: "{}") {{ id }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert!(!again.is_ok());

    // The audit trail recorded both actions.
    let trail = AuditLog::find_for_entity(
        "commission",
        uuid::Uuid::parse_str(&id).unwrap(),
        pool,
    )
    .await
    .unwrap();
    let actions: Vec<&str> = trail.iter().map(|e| e.action.as_str()).collect();
    assert!(actions.contains(&"commission.submitted"));
    assert!(actions.contains(&"commission.approved"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn revision_loop_restarts_and_clears_reason(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Roof Tech", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Ops Mgr", EmployeeRole::Manager)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Skylight Add-on")
        .await
        .unwrap();
    let id = commission_id.into_uuid().to_string();

    let manager_client = GraphQLClient::as_employee(pool.clone(), manager, false, true);
    let bounced = manager_client
        .execute(
            &format!(
                r#"mutation {{ requestCommissionRevision(id: "{}", reason: "No signed change order") {{ status rejectionReason }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = bounced.unwrap();
    assert_eq!(
        data["requestCommissionRevision"]["status"],
        json!("REVISION_REQUIRED")
    );
    assert_eq!(
        data["requestCommissionRevision"]["rejectionReason"],
        json!("No signed change order")
    );

    // An empty reason is rejected outright.
    let empty = manager_client
        .execute(
            &format!(
                r#"mutation {{ requestCommissionRevision(id: "{}", reason: "  ") {{ id }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!empty.is_ok());

    // Only the submitter may resubmit.
    let not_owner = manager_client
        .execute(
            &format!(r#"mutation {{ resubmitCommission(id: "{}") {{ id }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert!(!not_owner.is_ok());

    let submit_client = GraphQLClient::as_employee(pool.clone(), submitter, false, false);
    let resubmitted = submit_client
        .execute(
            &format!(
                r#"mutation {{ resubmitCommission(id: "{}") {{ status rejectionReason }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = resubmitted.unwrap();
    assert_eq!(data["resubmitCommission"]["status"], json!("PENDING_REVIEW"));
    assert_eq!(data["resubmitCommission"]["rejectionReason"], json!(null));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn draw_requests_respect_the_commission_cap(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Canvasser", EmployeeRole::Standard)
        .await
        .unwrap();
    let admin = create_employee(pool, "Owner", EmployeeRole::Admin)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Full Replace")
        .await
        .unwrap();
    let id = commission_id.into_uuid().to_string();

    let admin_client = GraphQLClient::as_employee(pool.clone(), admin, true, false);
    admin_client
        .execute(
            &format!(r#"mutation {{ approveCommission(id: "{}") {{ id }} }}"#, id),
            juniper::Variables::new(),
        )
        .await
        .unwrap();

    let submit_client = GraphQLClient::as_employee(pool.clone(), submitter, false, false);

    // Fixture commission amount is 1800.00; a 1000.00 draw fits.
    let first = submit_client
        .execute(
            &format!(
                r#"mutation {{ requestDraw(input: {{ commissionId: "{}", amount: "1000.00" }}) {{ id status }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = first.unwrap();
    assert_eq!(data["requestDraw"]["status"], json!("REQUESTED"));
    let draw_id = data["requestDraw"]["id"].as_str().unwrap().to_string();

    // A second draw that would push the total past the cap is rejected.
    let too_much = submit_client
        .execute(
            &format!(
                r#"mutation {{ requestDraw(input: {{ commissionId: "{}", amount: "900.00" }}) {{ id }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!too_much.is_ok());

    // Approve then pay out the first draw.
    let approved = admin_client
        .execute(
            &format!(r#"mutation {{ approveDraw(id: "{}") {{ status }} }}"#, draw_id),
            juniper::Variables::new(),
        )
        .await;
    assert_eq!(approved.unwrap()["approveDraw"]["status"], json!("APPROVED"));

    let paid = admin_client
        .execute(
            &format!(r#"mutation {{ markDrawPaid(id: "{}") {{ status paidAt }} }}"#, draw_id),
            juniper::Variables::new(),
        )
        .await;
    let data = paid.unwrap();
    assert_eq!(data["markDrawPaid"]["status"], json!("PAID"));
    assert!(!data["markDrawPaid"]["paidAt"].is_null());

    // Paying again is an invalid transition.
    let again = admin_client
        .execute(
            &format!(r#"mutation {{ markDrawPaid(id: "{}") {{ id }} }}"#, draw_id),
            juniper::Variables::new(),
        )
        .await;
    assert!(!again.is_ok());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn draws_require_an_approved_commission(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let submitter = create_employee(pool, "Foreman", EmployeeRole::Standard)
        .await
        .unwrap();

    let commission_id = create_pending_commission(pool, submitter, "Pending Job")
        .await
        .unwrap();

    let client = GraphQLClient::as_employee(pool.clone(), submitter, false, false);
    let result = client
        .execute(
            &format!(
                r#"mutation {{ requestDraw(input: {{ commissionId: "{}", amount: "100.00" }}) {{ id }} }}"#,
                commission_id.into_uuid()
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!result.is_ok());
}
