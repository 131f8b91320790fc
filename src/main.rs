mod config;
mod error;
mod handlers;
mod middleware;
mod migration;
mod models;
mod response;
mod routes;
mod services;
mod utils;

use axum::{extract::Extension, response::IntoResponse, routing::get, Json, Router};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        // Auth routes
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::get_current_user,
        crate::handlers::auth::logout,
        crate::handlers::auth::forgot_password,
        crate::handlers::auth::reset_password,
        // Class routes
        crate::handlers::gym_class::list_classes,
        crate::handlers::gym_class::get_class,
        crate::handlers::gym_class::create_class,
        crate::handlers::gym_class::update_class,
        crate::handlers::gym_class::update_routine,
        crate::handlers::gym_class::delete_class,
        // Trainer routes
        crate::handlers::trainer::list_trainers,
        crate::handlers::trainer::get_trainer,
        crate::handlers::trainer::create_trainer,
        crate::handlers::trainer::update_trainer,
        crate::handlers::trainer::update_schedule,
        crate::handlers::trainer::delete_trainer,
        // Membership routes
        crate::handlers::membership::list_memberships,
        crate::handlers::membership::get_membership,
        crate::handlers::membership::create_membership,
        crate::handlers::membership::update_membership,
        crate::handlers::membership::delete_membership,
        // Contact routes
        crate::handlers::contact::submit_contact,
        crate::handlers::contact::list_contacts,
        // User routes
        crate::handlers::user::update_profile,
        crate::handlers::user::enroll_in_class,
        crate::handlers::user::my_classes,
        crate::handlers::user::list_users,
        crate::handlers::user::get_user,
        crate::handlers::user::create_user,
        crate::handlers::user::update_user,
        crate::handlers::user::delete_user,
        // Payment routes
        crate::handlers::payment::create_payment,
        crate::handlers::payment::list_payments,
        // Feedback routes
        crate::handlers::feedback::submit_feedback,
        crate::handlers::feedback::list_feedback,
    ),
    components(
        schemas(
            crate::response::ApiResponse<serde_json::Value>,
            crate::response::PaginatedResponse<serde_json::Value>,
            crate::response::TokenResponse<crate::handlers::auth::UserSummary>,
            crate::error::AppError,
            // Models
            crate::models::UserModel,
            crate::models::TrainerModel,
            crate::models::GymClassModel,
            crate::models::MembershipModel,
            crate::models::ContactModel,
            // Auth
            crate::handlers::auth::RegisterRequest,
            crate::handlers::auth::LoginRequest,
            crate::handlers::auth::ForgotPasswordRequest,
            crate::handlers::auth::ResetPasswordRequest,
            crate::handlers::auth::UserSummary,
            crate::handlers::auth::CurrentUserResponse,
            // Classes
            crate::handlers::gym_class::ClassResponse,
            crate::handlers::gym_class::CreateClassRequest,
            crate::handlers::gym_class::UpdateClassRequest,
            crate::handlers::gym_class::UpdateRoutineRequest,
            // Trainers
            crate::handlers::trainer::CreateTrainerRequest,
            crate::handlers::trainer::UpdateTrainerRequest,
            crate::handlers::trainer::UpdateScheduleRequest,
            // Memberships
            crate::handlers::membership::MembershipRequest,
            // Contact
            crate::handlers::contact::ContactRequest,
            // Users
            crate::handlers::user::UpdateProfileRequest,
            crate::handlers::user::AdminCreateUserRequest,
            crate::handlers::user::AdminUpdateUserRequest,
        )
    ),
    tags(
        (name = "auth", description = "Authentication operations"),
        (name = "classes", description = "Class catalog operations"),
        (name = "trainers", description = "Trainer catalog operations"),
        (name = "memberships", description = "Membership plan operations"),
        (name = "contact", description = "Contact form operations"),
        (name = "users", description = "User and enrollment operations"),
        (name = "payments", description = "Payment operations"),
        (name = "feedback", description = "Feedback operations"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitin5=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration before doing anything else
    let jwt_config = validate_config()?;

    // Initialize JWT config
    utils::jwt::init_jwt_config(jwt_config)?;

    tracing::info!("Starting FITIN5 API v{}...", env!("CARGO_PKG_VERSION"));

    let db = config::database::get_database().await?;
    tracing::info!("Database connected successfully");

    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");

    services::bootstrap_admin::ensure_bootstrap_admin(&db).await?;

    let email_service = services::email::EmailService::from_env();
    if email_service.is_configured() {
        tracing::info!("SMTP email service configured");
    } else {
        tracing::warn!("SMTP not configured, emails will be skipped");
    }

    let app = create_app()
        .layer(Extension(db))
        .layer(Extension(email_service));

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Validate all required configuration at startup (fail-fast).
fn validate_config() -> anyhow::Result<crate::config::jwt::JwtConfig> {
    // JWT config — validated and cached
    let jwt_config = config::jwt::JwtConfig::from_env()?;

    // DATABASE_URL — checked here for early error; actual connection happens later
    if env::var("DATABASE_URL").is_err() {
        return Err(anyhow::anyhow!(
            "DATABASE_URL environment variable must be set"
        ));
    }

    Ok(jwt_config)
}

fn build_cors_layer() -> CorsLayer {
    use axum::http::{header, HeaderValue, Method};

    let origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins_str == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

fn create_app() -> Router {
    Router::new()
        .route("/", get(health_check))
        .merge(routes::create_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum::middleware::from_fn(
            middleware::security::security_headers_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Health check successful", body = serde_json::Value)
    )
)]
async fn health_check(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    let db_ok = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await
        .is_ok();

    let status = if db_ok { "ok" } else { "degraded" };

    Json(json!({
        "status": status,
        "service": "FITIN5 API",
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_ok,
    }))
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received, gracefully shutting down...");
}
