//! Integration tests for check-out and soft delete.

use salvo::http::StatusCode;

use super::helpers::*;

const REGISTRY: &str = "/api/registry";

async fn create_one(service: &salvo::Service, token: &str, department_id: i64) -> i64 {
    TestRequest::post(REGISTRY)
        .bearer(token)
        .json(&entry_body(department_id, "Nimal Perera"))
        .send(service)
        .await
        .assert_status(StatusCode::CREATED)
        .data()["id"]
        .as_i64()
        .expect("id is an integer")
}

#[test_log::test(tokio::test)]
async fn checkout_then_delete_then_nothing() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let (_staff_id, token) = test_db
        .seed_authenticated_staff()
        .await
        .expect("Failed to seed staff");
    let department_id = test_db
        .seed_department("Land Registry")
        .await
        .expect("Failed to seed department");

    let service = create_db_test_service(&test_db.url()).await;
    let id = create_one(&service, &token, department_id).await;
    let path = format!("{REGISTRY}/{id}");

    let before = test_db.get_entry(id).await.expect("entry stored");

    let updated = TestRequest::put(&path)
        .bearer(&token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(updated["status"], "checked_out");
    assert_eq!(updated["registry_id"], "REG00001");
    assert_eq!(updated["department_name"], "Land Registry");

    let after = test_db.get_entry(id).await.expect("entry stored");
    assert!(after.updated_at > before.updated_at);
    assert_eq!(after.entry_time, before.entry_time);
    assert_eq!(after.visitor_name, before.visitor_name);
    assert_eq!(after.created_by, before.created_by);

    let message = TestRequest::put(&path)
        .bearer(&token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_message();
    assert_eq!(message, "Cannot change status from checked_out to checked_out");

    let deleted = TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(deleted["status"], "deleted");

    let message = TestRequest::put(&path)
        .bearer(&token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT)
        .error_message();
    assert_eq!(message, "Cannot change status from deleted to checked_out");

    TestRequest::delete(&path)
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::CONFLICT);

    // The row is kept.
    assert_eq!(test_db.count_entries().await.expect("count"), 1);
}

#[test_log::test(tokio::test)]
async fn active_entries_can_be_deleted_directly() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let (_staff_id, token) = test_db
        .seed_authenticated_staff()
        .await
        .expect("Failed to seed staff");
    let department_id = test_db
        .seed_department("Land Registry")
        .await
        .expect("Failed to seed department");

    let service = create_db_test_service(&test_db.url()).await;
    let id = create_one(&service, &token, department_id).await;

    let updated = TestRequest::put(&format!("{REGISTRY}/{id}"))
        .bearer(&token)
        .json(&serde_json::json!({ "status": "deleted" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(updated["status"], "deleted");
}

#[test_log::test(tokio::test)]
async fn status_update_rejects_unknown_targets_and_entries() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let (_staff_id, token) = test_db
        .seed_authenticated_staff()
        .await
        .expect("Failed to seed staff");
    let department_id = test_db
        .seed_department("Land Registry")
        .await
        .expect("Failed to seed department");

    let service = create_db_test_service(&test_db.url()).await;
    let id = create_one(&service, &token, department_id).await;

    TestRequest::put(&format!("{REGISTRY}/{id}"))
        .bearer(&token)
        .json(&serde_json::json!({ "status": "active" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::put(&format!("{REGISTRY}/{id}"))
        .bearer(&token)
        .json(&serde_json::json!({ "status": "archived" }))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let message = TestRequest::put(&format!("{REGISTRY}/9999"))
        .bearer(&token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .error_message();
    assert_eq!(message, "Registry entry 9999 not found");

    TestRequest::delete(&format!("{REGISTRY}/9999"))
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let stored = test_db.get_entry(id).await.expect("entry stored");
    assert_eq!(stored.status.as_str(), "active");
}

#[test_log::test(tokio::test)]
async fn deleted_registry_ids_are_never_reused() {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let (_staff_id, token) = test_db
        .seed_authenticated_staff()
        .await
        .expect("Failed to seed staff");
    let department_id = test_db
        .seed_department("Land Registry")
        .await
        .expect("Failed to seed department");

    let service = create_db_test_service(&test_db.url()).await;
    let first = create_one(&service, &token, department_id).await;

    TestRequest::delete(&format!("{REGISTRY}/{first}"))
        .bearer(&token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let data = TestRequest::post(REGISTRY)
        .bearer(&token)
        .json(&entry_body(department_id, "Next Visitor"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .data();
    assert_eq!(data["registry_id"], "REG00002");
}
