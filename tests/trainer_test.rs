mod common;

use serde_json::Value;

async fn create_trainer(app: &common::TestApp, token: &str, name: &str) -> i64 {
    let resp = app
        .client
        .post(app.url("/trainers"))
        .bearer_auth(token)
        .json(&serde_json::json!({
            "name": name,
            "specialty": "Strength",
            "bio": "Former powerlifter",
            "experience": 7,
            "schedule": [{ "day": "Monday", "hours": "09:00-17:00" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn trainer_crud_round_trip() {
    let app = common::spawn_app().await;
    let admin = common::create_admin_user(&app, "tr_admin").await;
    let id = create_trainer(&app, &admin.token, "Pat Lifts").await;

    // Public read
    let resp = app
        .client
        .get(app.url(&format!("/trainers/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Pat Lifts");
    assert_eq!(body["data"]["photo"], "default-trainer.jpg");

    // Update
    let resp = app
        .client
        .put(app.url(&format!("/trainers/{}", id)))
        .bearer_auth(&admin.token)
        .json(&serde_json::json!({
            "name": "Pat Lifts",
            "specialty": "Olympic lifting",
            "bio": "Former powerlifter",
            "experience": 8
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["specialty"], "Olympic lifting");

    // Replace schedule
    let resp = app
        .client
        .put(app.url(&format!("/trainers/{}/schedule", id)))
        .bearer_auth(&admin.token)
        .json(&serde_json::json!({
            "schedule": [{ "day": "Friday", "hours": "12:00-20:00" }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["schedule"][0]["day"], "Friday");

    // Delete
    let resp = app
        .client
        .delete(app.url(&format!("/trainers/{}", id)))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .client
        .get(app.url(&format!("/trainers/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Trainer not found");
}

#[tokio::test]
async fn trainer_writes_require_admin() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "tr_nobody").await;

    let resp = app
        .client
        .post(app.url("/trainers"))
        .bearer_auth(&user.token)
        .json(&serde_json::json!({
            "name": "Nope",
            "specialty": "None",
            "bio": "n/a",
            "experience": 0
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn deleting_trainer_detaches_classes() {
    let app = common::spawn_app().await;
    let admin = common::create_admin_user(&app, "tr_det_admin").await;
    let trainer_id = create_trainer(&app, &admin.token, "Leaving Soon").await;

    let resp = app
        .client
        .post(app.url("/classes"))
        .bearer_auth(&admin.token)
        .json(&serde_json::json!({
            "name": "Orphan Class",
            "description": "Keeps running",
            "duration": 50,
            "trainer_id": trainer_id
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    let class_id = body["data"]["id"].as_i64().unwrap();

    app.client
        .delete(app.url(&format!("/trainers/{}", trainer_id)))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();

    // The class survives with its trainer slot cleared
    let resp = app
        .client
        .get(app.url(&format!("/classes/{}", class_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["trainer"].is_null());
}
