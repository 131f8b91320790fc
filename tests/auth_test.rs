mod common;

use serde_json::Value;

#[tokio::test]
async fn register_and_login() {
    let app = common::spawn_app().await;

    // Register
    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "password_123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["role"], "user");
    assert_eq!(body["user"]["roleBase"], 0);
    // Summary is mirrored under both keys
    assert_eq!(body["user"], body["data"]);
    let token = body["token"].as_str().unwrap();

    // Login
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "alice@example.com",
            "password": "password_123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());

    // Get current user
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Alice");
    // Credential material never leaves the server
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("reset_password_token").is_none());
}

#[tokio::test]
async fn register_duplicate_email_fails() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": "Bob",
            "email": "bob@example.com",
            "password": "password_123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": "Bob Again",
            "email": "bob@example.com",
            "password": "password_456"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "carol").await;

    let known_email = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": user.email,
            "password": "wrong_password"
        }))
        .send()
        .await
        .unwrap();
    let unknown_email = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({
            "email": "nobody@test.com",
            "password": "wrong_password"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(known_email.status(), 401);
    assert_eq!(unknown_email.status(), 401);
    let a: Value = known_email.json().await.unwrap();
    let b: Value = unknown_email.json().await.unwrap();
    assert_eq!(a, b);
    assert_eq!(a["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_missing_credentials_rejected() {
    let app = common::spawn_app().await;

    for payload in [
        serde_json::json!({}),
        serde_json::json!({ "email": "x@test.com" }),
        serde_json::json!({ "email": "", "password": "secret123" }),
    ] {
        let resp = app
            .client
            .post(app.url("/auth/login"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400, "payload: {}", payload);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Please provide an email and password");
    }
}

#[tokio::test]
async fn requests_without_token_are_unauthorized() {
    let app = common::spawn_app().await;

    let resp = app.client.get(app.url("/auth/me")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = app
        .client
        .get(app.url("/auth/me"))
        .header("Authorization", "Bearer not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn deleted_user_token_is_rejected() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "ghost").await;

    use sea_orm::{ConnectionTrait, Statement};
    app.db
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            vec![user.id.into()],
        ))
        .await
        .unwrap();

    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn logout_acknowledges_and_token_stays_valid() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "dave").await;

    let resp = app
        .client
        .get(app.url("/auth/logout"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["success"].as_bool().unwrap());

    // Stateless tokens are only invalidated by expiry
    let resp = app
        .client
        .get(app.url("/auth/me"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn forgot_password_unknown_email_is_404() {
    let app = common::spawn_app().await;

    let resp = app
        .client
        .post(app.url("/auth/forgotpassword"))
        .json(&serde_json::json!({ "email": "missing@test.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "There is no user with that email");
}

#[tokio::test]
async fn forgot_password_with_malformed_email_is_404() {
    let app = common::spawn_app().await;

    // Not an email at all, still just an unknown address
    let resp = app
        .client
        .post(app.url("/auth/forgotpassword"))
        .json(&serde_json::json!({ "email": "not-an-email" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "There is no user with that email");
}

#[tokio::test]
async fn failed_reset_email_clears_pending_token() {
    // SMTP pointed at a local port nothing listens on, so delivery fails.
    let email_service =
        fitin5::services::email::EmailService::with_config(fitin5::config::email::EmailConfig {
            smtp_host: "127.0.0.1".to_string(),
            smtp_port: 1,
            smtp_username: "mailer".to_string(),
            smtp_password: "secret".to_string(),
            from_address: "FITIN5 <mailer@test.com>".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        });
    let app = common::spawn_app_with_email(email_service).await;
    let user = common::create_test_user(&app, "ivy").await;

    let resp = app
        .client
        .post(app.url("/auth/forgotpassword"))
        .json(&serde_json::json!({ "email": user.email }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email could not be sent");

    // The half-issued token pair was rolled back
    use sea_orm::{ConnectionTrait, Statement};
    let row = app
        .db
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT reset_password_token, reset_password_expire FROM users WHERE id = $1",
            vec![user.id.into()],
        ))
        .await
        .unwrap()
        .expect("user row");
    let token: Option<String> = row.try_get("", "reset_password_token").unwrap();
    let expire: Option<chrono::NaiveDateTime> = row.try_get("", "reset_password_expire").unwrap();
    assert!(token.is_none());
    assert!(expire.is_none());
}

#[tokio::test]
async fn reset_password_full_flow() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "erin").await;

    // Obtain a plaintext token the same way the email path does
    let auth = fitin5::services::auth::AuthService::new(app.db.clone());
    let plaintext = auth.issue_reset_token(&user.email).await.unwrap();

    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", plaintext)))
        .json(&serde_json::json!({ "password": "brand_new_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["token"].as_str().is_some());

    // The old password no longer works
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({ "email": user.email, "password": "test_password_123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // The new one does
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({ "email": user.email, "password": "brand_new_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "frank").await;

    let auth = fitin5::services::auth::AuthService::new(app.db.clone());
    let plaintext = auth.issue_reset_token(&user.email).await.unwrap();

    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", plaintext)))
        .json(&serde_json::json!({ "password": "first_new_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Replaying the consumed token fails
    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", plaintext)))
        .json(&serde_json::json!({ "password": "second_new_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token");

    // And the password from the replay attempt was not applied
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({ "email": user.email, "password": "first_new_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn expired_reset_token_rejected() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "gina").await;

    let auth = fitin5::services::auth::AuthService::new(app.db.clone());
    let plaintext = auth.issue_reset_token(&user.email).await.unwrap();

    // Force the expiry into the past
    use sea_orm::{ConnectionTrait, Statement};
    app.db
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE users SET reset_password_expire = NOW() - INTERVAL '1 hour' WHERE email = $1",
            vec![user.email.clone().into()],
        ))
        .await
        .unwrap();

    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", plaintext)))
        .json(&serde_json::json!({ "password": "wont_apply" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Original password untouched
    let resp = app
        .client
        .post(app.url("/auth/login"))
        .json(&serde_json::json!({ "email": user.email, "password": "test_password_123" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn newest_reset_token_wins() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "hana").await;

    let auth = fitin5::services::auth::AuthService::new(app.db.clone());
    let first = auth.issue_reset_token(&user.email).await.unwrap();
    let second = auth.issue_reset_token(&user.email).await.unwrap();
    assert_ne!(first, second);

    // The superseded token is dead
    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", first)))
        .json(&serde_json::json!({ "password": "stale_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // The latest one works
    let resp = app
        .client
        .put(app.url(&format!("/auth/resetpassword/{}", second)))
        .json(&serde_json::json!({ "password": "fresh_pass" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn admin_routes_enforce_role() {
    let app = common::spawn_app().await;
    let plain = common::create_test_user(&app, "plain").await;

    let resp = app
        .client
        .get(app.url("/users"))
        .bearer_auth(&plain.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["error"],
        "User role user (base:0) is not authorized to access this route"
    );

    let admin = common::create_admin_user(&app, "boss").await;
    let resp = app
        .client
        .get(app.url("/users"))
        .bearer_auth(&admin.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn legacy_role_base_grants_admin() {
    let app = common::spawn_app().await;
    let user = common::create_test_user(&app, "legacy").await;
    common::make_legacy_admin(&app.db, user.id).await;

    // role is still "user" but role_base = 1 opens the gate
    let resp = app
        .client
        .get(app.url("/users"))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
