mod common;

use serde_json::json;

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn tomato_payload() -> serde_json::Value {
    json!({
        "name": "Tomato",
        "description": "Fresh farm product",
        "price": 42.5,
        "category": "Vegetables",
        "stock": 10,
        "location": "Delhi"
    })
}

#[tokio::test]
async fn create_then_fetch_product_with_owner() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = client()
        .post(format!("{}/api/v1/products", app.address))
        .bearer_auth("integration-test-token")
        .json(&tomato_payload())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.expect("create body is JSON");
    assert_eq!(body["status"], "OK");
    let id = body["item"]["id"].as_str().expect("created id").to_string();
    assert_eq!(body["item"]["rating"], 0.0);

    let response = client()
        .get(format!("{}/api/v1/products/{}", app.address, id))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("detail body is JSON");
    // the owner reference is resolved to a name/email projection,
    // email stored lowercase
    assert_eq!(body["item"]["createdBy"]["email"], "test.farmer@example.com");
    assert_eq!(body["item"]["createdBy"]["name"], "Test Farmer");
}

#[tokio::test]
async fn listing_filters_and_paginates() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    for (name, category, price) in [
        ("Tomato", "Vegetables", 30.0),
        ("Apple", "Fruits", 120.0),
        ("Mango", "Fruits", 250.0),
    ] {
        let mut payload = tomato_payload();
        payload["name"] = json!(name);
        payload["category"] = json!(category);
        payload["price"] = json!(price);

        let response = client()
            .post(format!("{}/api/v1/products", app.address))
            .bearer_auth("integration-test-token")
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status().as_u16(), 201);
    }

    let response = client()
        .get(format!(
            "{}/api/v1/products?category=Fruits&minPrice=50&maxPrice=200&limit=10",
            app.address
        ))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("listing body is JSON");
    assert_eq!(body["results"], 1);
    assert_eq!(body["total"], 1);
    assert_eq!(body["list"][0]["name"], "Apple");
}

#[tokio::test]
async fn invalid_price_is_rejected_and_nothing_is_persisted() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let mut payload = tomato_payload();
    payload["price"] = json!(-5);

    let response = client()
        .post(format!("{}/api/v1/products", app.address))
        .bearer_auth("integration-test-token")
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&app.db_pool)
        .await
        .expect("count query");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn mutations_require_authentication() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = client()
        .post(format!("{}/api/v1/products", app.address))
        .json(&tomato_payload())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn deleting_a_missing_product_is_not_found() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = client()
        .delete(format!(
            "{}/api/v1/products/{}",
            app.address,
            uuid::Uuid::new_v4()
        ))
        .bearer_auth("integration-test-token")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.expect("error body is JSON");
    assert_eq!(body["message"], "No product found with that ID");
}

#[tokio::test]
async fn partial_update_keeps_unmentioned_fields() {
    let Some(app) = common::spawn_app().await else {
        return;
    };

    let response = client()
        .post(format!("{}/api/v1/products", app.address))
        .bearer_auth("integration-test-token")
        .json(&tomato_payload())
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.expect("create body is JSON");
    let id = body["item"]["id"].as_str().expect("created id").to_string();

    let response = client()
        .put(format!("{}/api/v1/products/{}", app.address, id))
        .bearer_auth("integration-test-token")
        .json(&json!({ "price": 55.0 }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("update body is JSON");
    assert_eq!(body["item"]["price"], 55.0);
    assert_eq!(body["item"]["name"], "Tomato");
    assert_eq!(body["item"]["stock"], 10);
}
