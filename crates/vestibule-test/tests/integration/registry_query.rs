//! Integration tests for registry listings, single entries and the daily summary.

use chrono::{DateTime, TimeZone, Utc};
use salvo::http::StatusCode;

use super::helpers::*;

const REGISTRY: &str = "/api/registry";

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

/// Seeded day: three visits to Land Registry and one to Pensions on
/// 2024-03-15, plus one Land Registry visit on the following midnight.
struct SeededDay {
    test_db: TestDb,
    token: String,
    land: i64,
    pensions: i64,
    ids: Vec<i64>,
}

async fn seed_day() -> SeededDay {
    let test_db = TestDb::new().await.expect("Failed to create test database");
    let (_staff_id, token) = test_db
        .seed_authenticated_staff()
        .await
        .expect("Failed to seed staff");
    let land = test_db
        .seed_department("Land Registry")
        .await
        .expect("Failed to seed department");
    let pensions = test_db
        .seed_department("Pensions")
        .await
        .expect("Failed to seed department");

    let visits = [
        ("REG00001", land, "Nimal Perera", at(9, 5)),
        ("REG00002", land, "Kamala Silva", at(10, 30)),
        ("REG00003", pensions, "Sunil Perera", at(11, 0)),
        ("REG00004", land, "Ruwan Fernando", at(8, 45)),
        (
            "REG00005",
            land,
            "Midnight Visitor",
            Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        ),
    ];

    let mut ids = Vec::new();
    for (registry_id, department_id, name, entry_time) in visits {
        let id = test_db
            .insert_raw_entry(registry_id, department_id, name)
            .await
            .expect("Failed to insert entry");
        test_db
            .set_entry_time(id, entry_time)
            .await
            .expect("Failed to set entry time");
        ids.push(id);
    }

    SeededDay {
        test_db,
        token,
        land,
        pensions,
        ids,
    }
}

#[test_log::test(tokio::test)]
async fn list_is_one_day_newest_first() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    let response = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["message"], "Found 4 registry entries");
    assert_eq!(
        registry_ids(&body["data"]),
        ["REG00003", "REG00002", "REG00001", "REG00004"]
    );

    let first = &body["data"][0];
    assert_eq!(first["department_name"], "Pensions");
    assert!(first["division_name"].is_null());
    assert!(first["public_user_name"].is_null());
}

#[test_log::test(tokio::test)]
async fn list_defaults_to_today() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    let data = TestRequest::post(REGISTRY)
        .bearer(&day.token)
        .json(&entry_body(day.land, "Walk In"))
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED)
        .data();

    let listed = TestRequest::get(REGISTRY)
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    assert_eq!(registry_ids(&listed), [data["registry_id"].as_str().expect("string")]);
}

#[test_log::test(tokio::test)]
async fn list_filters_by_department() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    let land = TestRequest::get(&format!(
        "{REGISTRY}?date=2024-03-15&department_id={}",
        day.land
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .data();
    assert_eq!(registry_ids(&land), ["REG00002", "REG00001", "REG00004"]);

    let pensions = TestRequest::get(&format!(
        "{REGISTRY}?date=2024-03-15&department_id={}",
        day.pensions
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .data();
    assert_eq!(registry_ids(&pensions), ["REG00003"]);
}

#[test_log::test(tokio::test)]
async fn list_search_matches_name_nic_and_registry_id() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    let by_name = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&search=PERERA"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&by_name), ["REG00003", "REG00001"]);

    let by_registry_id = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&search=reg00002"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&by_registry_id), ["REG00002"]);

    // Every seeded visitor shares the imported NIC.
    let by_nic = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&search=00000000v"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&by_nic).len(), 4);
}

#[test_log::test(tokio::test)]
async fn list_search_treats_wildcards_literally() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    for term in ["%25", "_"] {
        let data = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&search={term}"))
            .send(&service)
            .await
            .assert_status(StatusCode::OK)
            .data();
        assert_eq!(registry_ids(&data), Vec::<String>::new(), "term {term}");
    }
}

#[test_log::test(tokio::test)]
async fn list_filters_by_status() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    TestRequest::put(&format!("{REGISTRY}/{}", day.ids[0]))
        .bearer(&day.token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    TestRequest::delete(&format!("{REGISTRY}/{}", day.ids[1]))
        .bearer(&day.token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let active = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&active), ["REG00003", "REG00004"]);

    let checked_out = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&status=checked_out"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&checked_out), ["REG00001"]);

    let deleted = TestRequest::get(&format!("{REGISTRY}?date=2024-03-15&status=deleted"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(registry_ids(&deleted), ["REG00002"]);
}

#[test_log::test(tokio::test)]
async fn list_rejects_bad_parameters() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    TestRequest::get(&format!("{REGISTRY}?date=15-03-2024"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    TestRequest::get(&format!("{REGISTRY}?status=archived"))
        .send(&service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn show_returns_any_status_and_404s_unknown_ids() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    TestRequest::delete(&format!("{REGISTRY}/{}", day.ids[2]))
        .bearer(&day.token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let shown = TestRequest::get(&format!("{REGISTRY}/{}", day.ids[2]))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();
    assert_eq!(shown["registry_id"], "REG00003");
    assert_eq!(shown["status"], "deleted");
    assert_eq!(shown["department_name"], "Pensions");

    let message = TestRequest::get(&format!("{REGISTRY}/424242"))
        .send(&service)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .error_message();
    assert_eq!(message, "Registry entry 424242 not found");
}

#[test_log::test(tokio::test)]
async fn summary_counts_the_day_without_deleted_entries() {
    let day = seed_day().await;
    let service = create_db_test_service(&day.test_db.url()).await;

    TestRequest::put(&format!("{REGISTRY}/{}", day.ids[0]))
        .bearer(&day.token)
        .json(&serde_json::json!({ "status": "checked_out" }))
        .send(&service)
        .await
        .assert_status(StatusCode::OK);
    TestRequest::delete(&format!("{REGISTRY}/{}", day.ids[2]))
        .bearer(&day.token)
        .send(&service)
        .await
        .assert_status(StatusCode::OK);

    let summary = TestRequest::get(&format!("{REGISTRY}/summary?date=2024-03-15"))
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .data();

    assert_eq!(summary["date"], "2024-03-15");
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["new_visitors"], 3);
    assert_eq!(summary["existing_visitors"], 0);
    assert_eq!(summary["active"], 2);
    assert_eq!(summary["checked_out"], 1);

    let latest = summary["latest_entry_time"]
        .as_str()
        .expect("latest_entry_time is a string");
    assert_eq!(
        DateTime::parse_from_rfc3339(latest).expect("rfc3339"),
        at(10, 30)
    );

    let pensions = TestRequest::get(&format!(
        "{REGISTRY}/summary?date=2024-03-15&department_id={}",
        day.pensions
    ))
    .send(&service)
    .await
    .assert_status(StatusCode::OK)
    .data();
    assert_eq!(pensions["total"], 0);
    assert!(pensions["latest_entry_time"].is_null());
}
