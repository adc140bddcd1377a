use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn every_order_line_gets_a_pending_work_item(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    app.create_order(&[a, a]).await;

    let work_items: Vec<Value> = app.get("/work-items").await.json().await.unwrap();

    assert_eq!(work_items.len(), 2);
    assert!(work_items.iter().all(|w| w["status"] == "pending"));
}

#[actix_web::test]
async fn status_filter_returns_exact_matches(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    app.create_order(&[a, a, a]).await;

    let work_items: Vec<Value> = app.get("/work-items").await.json().await.unwrap();
    let id = work_items[0]["work_item_id"].as_str().unwrap().to_string();

    let response = app.patch(&format!("/work-items/{}/status", id), Some(&json!({ "status": "in_progress" }))).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "in_progress");

    let pending: Vec<Value> = app.get("/work-items?status=pending").await.json().await.unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|w| w["status"] == "pending"));

    let single: Value = app.get(&format!("/work-items/{}", id)).await.json().await.unwrap();
    assert_eq!(single["status"], "in_progress");
}

#[actix_web::test]
async fn unknown_status_is_bad_request(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    app.create_order(&[a]).await;

    let work_items: Vec<Value> = app.get("/work-items").await.json().await.unwrap();
    let id = work_items[0]["work_item_id"].as_str().unwrap().to_string();

    let response = app.patch(&format!("/work-items/{}/status", id), Some(&json!({ "status": "burnt" }))).await;
    assert_eq!(response.status().as_u16(), 400);

    assert_eq!(app.get("/work-items?status=burnt").await.status().as_u16(), 400);

    let unchanged: Value = app.get(&format!("/work-items/{}", id)).await.json().await.unwrap();
    assert_eq!(unchanged["status"], "pending");
}

#[actix_web::test]
async fn unknown_work_item_is_not_found(){
    let app = TestApp::spawn_app().await;

    let path = format!("/work-items/{}/status", Uuid::new_v4());
    let response = app.patch(&path, Some(&json!({ "status": "ready" }))).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(app.get(&format!("/work-items/{}", Uuid::new_v4())).await.status().as_u16(), 404);
}
