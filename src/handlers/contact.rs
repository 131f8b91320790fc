use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::ContactModel;
use crate::response::ApiResponse;
use crate::services::contact::ContactService;
use axum::{response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message received", body = ContactModel),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<ContactRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ContactService::new(db);
    let contact = service
        .create(&payload.name, &payload.email, &payload.message)
        .await?;

    Ok((axum::http::StatusCode::CREATED, ApiResponse::ok(contact)))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "All messages, newest first", body = Vec<ContactModel>),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "contact"
)]
pub async fn list_contacts(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = ContactService::new(db);
    let messages = service.list().await?;
    let count = messages.len();
    Ok(ApiResponse::list(messages, count))
}
