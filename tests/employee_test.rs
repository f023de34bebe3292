// Tenant-scoped employee registry over HTTP

mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serde_json::{json, Value};

fn employee_body(curp: &str, rfc: &str) -> Value {
    json!({
        "full_name": "Ana Lopez",
        "curp": curp,
        "rfc": rfc,
        "position": "Cashier",
        "salary": 9500.0,
        "social_security_number": "12345678901"
    })
}

#[tokio::test]
async fn test_add_requires_session_and_active_company() {
    let app = setup_test_app();
    let body = employee_body("LOAA900101MDFPNN09", "LOAA900101AB1");

    let anonymous = app.post("/api/employees/add").json(&body).send().await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let pending = app.register("acme_co_1", "ABC123456XY1").await;
    let response = app
        .post("/api/employees/add")
        .session(&pending)
        .json(&body)
        .send()
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_add_validates_and_normalizes() {
    let app = setup_test_app();
    let token = app.active_company("acme_co_1", "ABC123456XY1").await;

    let invalid = app
        .post("/api/employees/add")
        .session(&token)
        .json(&json!({ "full_name": "Ana", "curp": "bad", "salary": -5.0 }))
        .send()
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let body = invalid.json().await;
    assert_eq!(body["error"]["messages"].as_array().unwrap().len(), 5);

    let created = app
        .post("/api/employees/add")
        .session(&token)
        .json(&employee_body("loaa900101mdfpnn09", "LOAA900101AB1"))
        .send()
        .await;
    assert_eq!(created.status(), StatusCode::OK);
    let body = created.json().await;
    assert_eq!(body["data"]["curp"], "LOAA900101MDFPNN09");
    assert_eq!(body["data"]["rfc"], "loaa900101ab1");
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn test_duplicates_conflict_within_company_only() {
    let app = setup_test_app();
    let acme = app.active_company("acme_co_1", "ABC123456XY1").await;
    let beta = app.active_company("beta_co_1", "BBB123456XY1").await;
    let body = employee_body("LOAA900101MDFPNN09", "LOAA900101AB1");

    let first = app.post("/api/employees/add").session(&acme).json(&body).send().await;
    assert_eq!(first.status(), StatusCode::OK);

    let duplicate = app.post("/api/employees/add").session(&acme).json(&body).send().await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json().await["error"]["code"], "CONFLICT");

    let other_company = app.post("/api/employees/add").session(&beta).json(&body).send().await;
    assert_eq!(other_company.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_is_scoped_and_newest_first() {
    let app = setup_test_app();
    let acme = app.active_company("acme_co_1", "ABC123456XY1").await;
    let beta = app.active_company("beta_co_1", "BBB123456XY1").await;

    let anonymous = app.get("/api/employees/get").send().await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    for (curp, rfc) in [
        ("LOAA900101MDFPNN09", "LOAA900101AB1"),
        ("PEXJ850505HDFRRN01", "PEXJ850505CD2"),
    ] {
        let response = app
            .post("/api/employees/add")
            .session(&acme)
            .json(&employee_body(curp, rfc))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let list = app.get("/api/employees/get").session(&acme).send().await;
    assert_eq!(list.status(), StatusCode::OK);
    let body = list.json().await;
    let employees = body["data"].as_array().unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0]["curp"], "PEXJ850505HDFRRN01");

    let beta_list = app.get("/api/employees/get").session(&beta).send().await;
    let body = beta_list.json().await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_rules() {
    let app = setup_test_app();
    let acme = app.active_company("acme_co_1", "ABC123456XY1").await;
    let beta = app.active_company("beta_co_1", "BBB123456XY1").await;

    let created = app
        .post("/api/employees/add")
        .session(&acme)
        .json(&employee_body("LOAA900101MDFPNN09", "LOAA900101AB1"))
        .send()
        .await;
    let id = created.json().await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/employees/update/{}", id);
    let changes = json!({ "position": "Manager", "salary": 12000.0 });

    let anonymous = app.put(&uri).json(&changes).send().await;
    assert_eq!(anonymous.status(), StatusCode::NOT_FOUND);

    let foreign = app.put(&uri).session(&beta).json(&changes).send().await;
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let bad_id = app
        .put("/api/employees/update/not-a-uuid")
        .session(&acme)
        .json(&changes)
        .send()
        .await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);

    let missing = app
        .put(&format!("/api/employees/update/{}", uuid::Uuid::new_v4()))
        .session(&acme)
        .json(&changes)
        .send()
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = app
        .put(&uri)
        .session(&acme)
        .json(&json!({ "salary": -1.0 }))
        .send()
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let updated = app.put(&uri).session(&acme).json(&changes).send().await;
    assert_eq!(updated.status(), StatusCode::OK);
    let body = updated.json().await;
    assert_eq!(body["data"]["position"], "Manager");
    assert_eq!(body["data"]["salary"], 12000.0);
    assert_eq!(body["data"]["full_name"], "Ana Lopez");
}
