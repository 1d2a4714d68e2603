//! Integration tests for the warranty lifecycle.

mod common;

use common::*;
use serde_json::json;
use server_core::domains::employees::models::EmployeeRole;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn warranty_lifecycle_assign_resolve_close(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let creator = create_employee(pool, "Office Admin", EmployeeRole::Standard)
        .await
        .unwrap();
    let tech = create_employee(pool, "Service Tech", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Service Mgr", EmployeeRole::Manager)
        .await
        .unwrap();

    let creator_client = GraphQLClient::as_employee(pool.clone(), creator, false, false);
    let created = creator_client
        .execute(
            r#"
            mutation {
                createWarranty(input: {
                    customerName: "Bjornson",
                    propertyAddress: "44 Gable Ct",
                    issue: "Shingles lifting on south slope",
                    priorityLevel: URGENT
                }) { id status priorityLevel dateSubmitted }
            }
            "#,
            juniper::Variables::new(),
        )
        .await;
    let data = created.unwrap();
    assert_eq!(data["createWarranty"]["status"], json!("NEW"));
    assert_eq!(data["createWarranty"]["priorityLevel"], json!("URGENT"));
    assert!(!data["createWarranty"]["dateSubmitted"].is_null());
    let id = data["createWarranty"]["id"].as_str().unwrap().to_string();

    let manager_client = GraphQLClient::as_employee(pool.clone(), manager, false, true);

    // Standard users cannot assign.
    let denied = creator_client
        .execute(
            &format!(
                r#"mutation {{ assignWarranty(id: "{}", assigneeId: "{}") {{ id }} }}"#,
                id,
                tech.into_uuid()
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!denied.is_ok());

    let assigned = manager_client
        .execute(
            &format!(
                r#"mutation {{ assignWarranty(id: "{}", assigneeId: "{}") {{ status assignedTo }} }}"#,
                id,
                tech.into_uuid()
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = assigned.unwrap();
    assert_eq!(data["assignWarranty"]["status"], json!("ASSIGNED"));
    assert_eq!(
        data["assignWarranty"]["assignedTo"],
        json!(tech.into_uuid().to_string())
    );

    // The assignee sees it in their queue.
    let tech_client = GraphQLClient::as_employee(pool.clone(), tech, false, false);
    let mine = tech_client
        .execute(
            r#"query { myAssignedWarranties { id } }"#,
            juniper::Variables::new(),
        )
        .await;
    let data = mine.unwrap();
    assert!(data["myAssignedWarranties"]
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["id"] == json!(id)));

    // Walk it through the field statuses.
    let in_progress = manager_client
        .execute(
            &format!(
                r#"mutation {{ updateWarrantyStatus(id: "{}", status: IN_PROGRESS) {{ status }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    assert_eq!(
        in_progress.unwrap()["updateWarrantyStatus"]["status"],
        json!("IN_PROGRESS")
    );

    // Terminal statuses must go through their own mutations.
    let via_update = manager_client
        .execute(
            &format!(
                r#"mutation {{ updateWarrantyStatus(id: "{}", status: RESOLVED) {{ id }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!via_update.is_ok());

    // Close before resolution is invalid.
    let early_close = manager_client
        .execute(
            &format!(r#"mutation {{ closeWarranty(id: "{}") {{ id }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert!(!early_close.is_ok());

    let resolved = manager_client
        .execute(
            &format!(
                r#"mutation {{ resolveWarranty(id: "{}", resolution: "Re-nailed and sealed course") {{ status resolution }} }}"#,
                id
            ),
            juniper::Variables::new(),
        )
        .await;
    let data = resolved.unwrap();
    assert_eq!(data["resolveWarranty"]["status"], json!("RESOLVED"));

    let closed = manager_client
        .execute(
            &format!(r#"mutation {{ closeWarranty(id: "{}") {{ status }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert_eq!(closed.unwrap()["closeWarranty"]["status"], json!("CLOSED"));

    // A closed warranty takes no further transitions.
    let reassign = manager_client
        .execute(
            &format!(
                r#"mutation {{ assignWarranty(id: "{}", assigneeId: "{}") {{ id }} }}"#,
                id,
                tech.into_uuid()
            ),
            juniper::Variables::new(),
        )
        .await;
    assert!(!reassign.is_ok());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn cancel_works_from_any_open_state(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let creator = create_employee(pool, "Dispatcher", EmployeeRole::Standard)
        .await
        .unwrap();
    let manager = create_employee(pool, "Branch Mgr", EmployeeRole::Manager)
        .await
        .unwrap();

    let warranty_id = create_warranty(pool, creator, "Castillo", "low").await.unwrap();
    let id = warranty_id.into_uuid().to_string();

    let manager_client = GraphQLClient::as_employee(pool.clone(), manager, false, true);
    let cancelled = manager_client
        .execute(
            &format!(r#"mutation {{ cancelWarranty(id: "{}") {{ status }} }}"#, id),
            juniper::Variables::new(),
        )
        .await;
    assert_eq!(
        cancelled.unwrap()["cancelWarranty"]["status"],
        json!("CANCELLED")
    );

    // Cancelled warranties drop out of the open list.
    let open = manager_client
        .execute(
            r#"query { openWarranties(limit: 200) { id } }"#,
            juniper::Variables::new(),
        )
        .await;
    assert!(!open.unwrap()["openWarranties"]
        .as_array()
        .unwrap()
        .iter()
        .any(|w| w["id"] == json!(id)));
}
