mod common;

use serde_json::Value;

#[tokio::test]
async fn anyone_can_submit_contact_message() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/contact"))
        .json(&serde_json::json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "message": "What are your opening hours?"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());
    assert_eq!(body["data"]["is_read"], false);
}

#[tokio::test]
async fn contact_validation_rejects_bad_email() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/contact"))
        .json(&serde_json::json!({
            "name": "Visitor",
            "email": "not-an-email",
            "message": "Hello"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn contact_inbox_is_admin_only() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "ct_nobody").await;

    let resp = app
        .client
        .get(app.url("/contact"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let admin = common::create_admin_user(&app, "ct_admin").await;

    app.client
        .post(app.url("/contact"))
        .json(&serde_json::json!({
            "name": "First",
            "email": "first@example.com",
            "message": "Older message"
        }))
        .send()
        .await
        .unwrap();
    app.client
        .post(app.url("/contact"))
        .json(&serde_json::json!({
            "name": "Second",
            "email": "second@example.com",
            "message": "Newer message"
        }))
        .send()
        .await
        .unwrap();

    let resp = app
        .client
        .get(app.url("/contact"))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["count"].as_u64().unwrap() >= 2);
    // Newest first
    assert_eq!(body["data"][0]["name"], "Second");
}
