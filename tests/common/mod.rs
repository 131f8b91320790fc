#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        let config = fitin5::config::jwt::JwtConfig::from_env().unwrap();
        let _ = fitin5::utils::jwt::init_jwt_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.addr, path)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_email(fitin5::services::email::EmailService::from_env()).await
}

/// Same as spawn_app but with a caller-supplied email service, so tests
/// can exercise delivery failures.
pub async fn spawn_app_with_email(email_service: fitin5::services::email::EmailService) -> TestApp {
    init_env();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        fitin5::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    // Clean data tables (reverse dependency order)
    cleanup_tables(&db).await;

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(fitin5::routes::create_routes())
        .layer(axum::middleware::from_fn(
            fitin5::middleware::security::security_headers_middleware,
        ))
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(email_service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let addr_str = format!("http://{}", addr);
    let client = Client::new();

    TestApp {
        addr: addr_str,
        db,
        client,
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    let tables = [
        "class_enrollments",
        "contacts",
        "classes",
        "trainers",
        "users",
        "memberships",
    ];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} CASCADE", table);
        let _ = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await;
    }
}

pub struct TestUser {
    pub id: i32,
    pub token: String,
    pub email: String,
}

/// Register a user with a unique email; the default password is
/// "test_password_123".
pub async fn create_test_user(app: &TestApp, name_prefix: &str) -> TestUser {
    static USER_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    let unique_name = format!("{}_{}", name_prefix, counter);
    let email = format!("{}@test.com", unique_name);

    let resp = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": unique_name,
            "email": email,
            "password": "test_password_123"
        }))
        .send()
        .await
        .expect("Failed to register user");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.unwrap_or_else(|e| {
        panic!(
            "Failed to parse register response for user '{}': status={}, error={}",
            unique_name, status, e
        );
    });

    if !body["success"].as_bool().unwrap_or(false) {
        panic!(
            "Failed to register user '{}': status={}, body={}",
            unique_name, status, body
        );
    }

    let id = body["user"]["id"]
        .as_i64()
        .unwrap_or_else(|| panic!("Response missing user id for '{}': {}", unique_name, body))
        as i32;
    let token = body["token"]
        .as_str()
        .unwrap_or_else(|| panic!("Response missing token for '{}': {}", unique_name, body))
        .to_string();

    TestUser { id, token, email }
}

/// Make a user admin by directly updating the database.
pub async fn make_admin(db: &DatabaseConnection, user_id: i32) {
    db.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        "UPDATE users SET role = 'admin' WHERE id = $1",
        vec![user_id.into()],
    ))
    .await
    .expect("Failed to make user admin");
}

/// Set only the legacy numeric role flag, leaving role = 'user'.
pub async fn make_legacy_admin(db: &DatabaseConnection, user_id: i32) {
    db.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        "UPDATE users SET role_base = 1 WHERE id = $1",
        vec![user_id.into()],
    ))
    .await
    .expect("Failed to set role_base");
}

/// Register a user and promote them to admin.
pub async fn create_admin_user(app: &TestApp, name_prefix: &str) -> TestUser {
    let user = create_test_user(app, name_prefix).await;
    make_admin(&app.db, user.id).await;
    user
}

/// Create a class directly through the admin API and return its id.
pub async fn create_test_class(app: &TestApp, admin_token: &str, name: &str) -> i32 {
    let resp = app
        .client
        .post(app.url("/classes"))
        .bearer_auth(admin_token)
        .json(&serde_json::json!({
            "name": name,
            "description": "A test class",
            "duration": 45
        }))
        .send()
        .await
        .expect("Failed to create class");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.expect("Failed to parse response");

    if !body["success"].as_bool().unwrap_or(false) {
        panic!("Failed to create class: status={}, body={}", status, body);
    }

    body["data"]["id"].as_i64().expect("class id") as i32
}
