mod common;

use serde_json::Value;

async fn create_plan(app: &common::TestApp, token: &str, name: &str, price: f64) -> i64 {
    let resp = app
        .client
        .post(app.url("/memberships"))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "name": name,
            "duration": 1,
            "price": price,
            "features": ["Gym access"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn plans_are_listed_cheapest_first() {
    let app = common::spawn_app().await;
    let admin = common::create_admin_user(&app, "mb_admin").await;

    create_plan(&app, &admin.token, "Premium", 79.99).await;
    create_plan(&app, &admin.token, "Basic", 29.99).await;
    create_plan(&app, &admin.token, "Standard", 49.99).await;

    let resp = app
        .client
        .get(app.url("/memberships"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["count"], 3);

    let prices: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    let mut sorted = prices.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(prices, sorted);
}

#[tokio::test]
async fn plan_update_and_delete() {
    let app = common::spawn_app().await;
    let admin = common::create_admin_user(&app, "mb_u_admin").await;
    let id = create_plan(&app, &admin.token, "Flex", 19.99).await;

    let resp = app
        .client
        .put(app.url(&format!("/memberships/{}", id)))
        .bearer_auth(&admin.token)
        .json(&serde_json::json!({
            "name": "Flex",
            "duration": 3,
            "price": 54.99,
            "features": ["Gym access", "Classes included"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["duration"], 3);
    assert_eq!(body["data"]["features"].as_array().unwrap().len(), 2);

    let resp = app
        .client
        .delete(app.url(&format!("/memberships/{}", id)))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .get(app.url(&format!("/memberships/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Membership not found");
}

#[tokio::test]
async fn plan_writes_require_admin() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "mb_nobody").await;

    let resp = app
        .client
        .post(app.url("/memberships"))
        .bearer_auth(&user.token)
        .json(&serde_json::json!({
            "name": "Sneaky",
            "duration": 1,
            "price": 0.01
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}
