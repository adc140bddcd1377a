use serde_json::{json, Value};
use uuid::Uuid;

use crate::helpers::TestApp;

#[actix_web::test]
async fn post_item_type_then_list_returns_it(){
    let app = TestApp::spawn_app().await;

    let id = app.create_item_type("coffee").await;

    let response = app.get("/item-types").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Vec<Value> = response.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["item_type_id"], json!(id));
    assert_eq!(body[0]["display_name"], "COFFEE");
}

#[actix_web::test]
async fn duplicate_item_type_name_is_bad_request(){
    let app = TestApp::spawn_app().await;
    app.create_item_type("coffee").await;

    let response = app.post("/item-types", &json!({
        "name": "coffee",
        "display_name": "Coffee again"
    })).await;

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn deleted_item_type_disappears_from_list(){
    let app = TestApp::spawn_app().await;
    let id = app.create_item_type("coffee").await;

    let response = app.delete(&format!("/item-types/{}", id)).await;
    assert_eq!(response.status().as_u16(), 204);

    let body: Vec<Value> = app.get("/item-types").await.json().await.unwrap();
    assert!(body.is_empty());

    let response = app.delete(&format!("/item-types/{}", id)).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn item_under_unknown_type_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post("/items", &json!({
        "name": "latte",
        "abbreviation": "LA",
        "price": 500,
        "key": "l",
        "item_type_id": Uuid::new_v4()
    })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("does not exist"));
}

#[actix_web::test]
async fn missing_fields_are_bad_request(){
    let app = TestApp::spawn_app().await;

    let response = app.post("/items", &json!({ "name": "latte" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn partial_item_update_keeps_omitted_fields(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let id = app.create_item(type_id, "latte", 500).await;

    let response = app.put(&format!("/items/{}", id), &json!({ "price": 550 })).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = app.get(&format!("/items/{}", id)).await.json().await.unwrap();
    assert_eq!(body["price"], 550);
    assert_eq!(body["name"], "latte");
    assert_eq!(body["abbreviation"], "la");
}

#[actix_web::test]
async fn deleted_item_is_not_found(){
    let app = TestApp::spawn_app().await;
    let type_id = app.create_item_type("coffee").await;
    let id = app.create_item(type_id, "latte", 500).await;

    assert_eq!(app.delete(&format!("/items/{}", id)).await.status().as_u16(), 204);

    assert_eq!(app.get(&format!("/items/{}", id)).await.status().as_u16(), 404);
    assert_eq!(app.delete(&format!("/items/{}", id)).await.status().as_u16(), 404);
}

#[actix_web::test]
async fn malformed_item_id_is_bad_request(){
    let app = TestApp::spawn_app().await;

    let response = app.get("/items/not-a-uuid").await;

    assert_eq!(response.status().as_u16(), 400);
}
