//! The same scenarios as the memory-backed tests, run through diesel against
//! a real database. Needs the postgres server from `configuration/base.yaml`:
//! `cargo test -- --ignored`.

use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::{id_of, TestApp};

fn item_ids(order: &Value) -> Vec<Uuid> {
    order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|line| serde_json::from_value(line["item_id"].clone()).unwrap())
        .collect()
}

#[actix_web::test]
#[ignore = "needs a running postgres server"]
async fn postgres_replace_keeps_line_order_and_drops_old_work_items(){
    let app = TestApp::spawn_app_with_postgres().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    let b = app.create_item(type_id, "mocha", 600).await;

    let order = app.create_order(&[a, a, b]).await;
    assert_eq!(item_ids(&order), vec![a, a, b]);
    let id = order["order_id"].as_str().unwrap().to_string();

    let response = app.put(&format!("/orders/{}", id), &json!({ "item_ids": [b, a] })).await;
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(item_ids(&updated), vec![b, a]);

    let work_items: Vec<Value> = app.get("/work-items").await.json().await.unwrap();
    assert_eq!(work_items.len(), 2);

    let response = app.put(&format!("/orders/{}", id), &json!({ "item_ids": [Uuid::new_v4()] })).await;
    assert_eq!(response.status().as_u16(), 400);
    let current: Value = app.get(&format!("/orders/{}", id)).await.json().await.unwrap();
    assert_eq!(item_ids(&current), vec![b, a]);
}

#[actix_web::test]
#[ignore = "needs a running postgres server"]
async fn postgres_delete_removes_lines_comments_and_discount_references(){
    let app = TestApp::spawn_app_with_postgres().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;

    let first = app.create_order(&[a]).await;
    let first_id = first["order_id"].as_str().unwrap().to_string();
    assert_eq!(app.patch(&format!("/orders/{}/served", first_id), None).await.status().as_u16(), 200);
    let comment = app.post(&format!("/orders/{}/comments", first_id), &json!({ "author": "serve", "text": "done" })).await;
    assert_eq!(comment.status().as_u16(), 201);

    let response = app.post("/orders", &json!({
        "order_number": 8,
        "billing_amount": 400,
        "discount_order_id": first_id,
        "discount_order_cups": 1,
        "item_ids": [a]
    })).await;
    assert_eq!(response.status().as_u16(), 201);
    let second_id = id_of(response, "order_id").await;

    assert_eq!(app.delete(&format!("/orders/{}", first_id)).await.status().as_u16(), 204);
    assert_eq!(app.get(&format!("/orders/{}", first_id)).await.status().as_u16(), 404);

    let second: Value = app.get(&format!("/orders/{}", second_id)).await.json().await.unwrap();
    assert!(second["discount_order_id"].is_null());

    let work_items: Vec<Value> = app.get("/work-items").await.json().await.unwrap();
    assert_eq!(work_items.len(), 1);
    assert_eq!(app.get(&format!("/items/{}", a)).await.status().as_u16(), 200);
}

#[actix_web::test]
#[ignore = "needs a running postgres server"]
async fn postgres_null_clears_item_assignee_and_discount(){
    let app = TestApp::spawn_app_with_postgres().await;
    let type_id = app.create_item_type("coffee").await;

    let response = app.post("/items", &json!({
        "name": "latte",
        "abbreviation": "la",
        "price": 500,
        "key": "l",
        "item_type_id": type_id,
        "assignee": "master"
    })).await;
    assert_eq!(response.status().as_u16(), 201);
    let a = id_of(response, "item_id").await;

    let order = app.create_order(&[a]).await;
    assert_eq!(order["items"][0]["assignee"], "master");

    let response = app.put(&format!("/items/{}", a), &json!({ "assignee": null })).await;
    assert_eq!(response.status().as_u16(), 200);
    let item: Value = app.get(&format!("/items/{}", a)).await.json().await.unwrap();
    assert!(item["assignee"].is_null());
    assert_eq!(item["price"], 500);

    let source = app.create_order(&[a]).await;
    let source_id = source["order_id"].as_str().unwrap().to_string();
    app.patch(&format!("/orders/{}/served", source_id), None).await;

    let id = order["order_id"].as_str().unwrap().to_string();
    let response = app.put(&format!("/orders/{}", id), &json!({ "discount_order_id": source_id })).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.put(&format!("/orders/{}", id), &json!({ "discount_order_id": null })).await;
    assert_eq!(response.status().as_u16(), 200);
    let current: Value = app.get(&format!("/orders/{}", id)).await.json().await.unwrap();
    assert!(current["discount_order_id"].is_null());
}

#[actix_web::test]
#[ignore = "needs a running postgres server"]
async fn postgres_ready_served_and_work_item_status(){
    let app = TestApp::spawn_app_with_postgres().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    let order = app.create_order(&[a, a]).await;
    let id = order["order_id"].as_str().unwrap().to_string();

    assert_eq!(app.patch(&format!("/orders/{}/ready", id), None).await.status().as_u16(), 200);
    let served: Value = app.patch(&format!("/orders/{}/served", id), None).await.json().await.unwrap();
    assert!(!served["served_at"].is_null());
    assert_eq!(app.patch(&format!("/orders/{}/ready", id), None).await.status().as_u16(), 409);

    let response = app.put(&format!("/orders/{}", id), &json!({ "ready_at": "2999-01-01T00:00:00Z" })).await;
    assert_eq!(response.status().as_u16(), 400);

    let work_items: Vec<Value> = app.get("/work-items?status=pending").await.json().await.unwrap();
    assert_eq!(work_items.len(), 2);
    let work_item_id = work_items[0]["work_item_id"].as_str().unwrap().to_string();

    let response = app.patch(&format!("/work-items/{}/status", work_item_id), Some(&json!({ "status": "ready" }))).await;
    assert_eq!(response.status().as_u16(), 200);

    let pending: Vec<Value> = app.get("/work-items?status=pending").await.json().await.unwrap();
    assert_eq!(pending.len(), 1);
    let ready: Vec<Value> = app.get("/work-items?status=ready").await.json().await.unwrap();
    assert_eq!(ready.len(), 1);
}
