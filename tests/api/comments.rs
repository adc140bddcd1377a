use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn comments_are_listed_newest_first(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    let order = app.create_order(&[a]).await;
    let id = order["order_id"].as_str().unwrap().to_string();
    let path = format!("/orders/{}/comments", id);

    let first = app.post(&path, &json!({ "author": "cashier", "text": "oat milk" })).await;
    assert_eq!(first.status().as_u16(), 201);
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = app.post(&path, &json!({ "author": "barista", "text": "extra hot" })).await;
    assert_eq!(second.status().as_u16(), 201);

    let comments: Vec<Value> = app.get(&path).await.json().await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "extra hot");
    assert_eq!(comments[1]["text"], "oat milk");

    let order: Value = app.get(&format!("/orders/{}", id)).await.json().await.unwrap();
    assert_eq!(order["comments"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn empty_comment_is_bad_request(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let a = app.create_item(type_id, "latte", 500).await;
    let order = app.create_order(&[a]).await;
    let id = order["order_id"].as_str().unwrap().to_string();

    let response = app.post(&format!("/orders/{}/comments", id), &json!({ "author": "cashier", "text": "" })).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn comments_on_unknown_order_are_not_found(){
    let app = TestApp::spawn_app().await;
    let path = format!("/orders/{}/comments", Uuid::new_v4());

    assert_eq!(app.get(&path).await.status().as_u16(), 404);

    let response = app.post(&path, &json!({ "author": "cashier", "text": "hello" })).await;
    assert_eq!(response.status().as_u16(), 404);
}
