use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::MembershipModel;
use crate::response::ApiResponse;
use crate::services::membership::MembershipService;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MembershipRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Plan length in months
    #[validate(range(min = 1))]
    pub duration: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Marketing feature list
    pub features: Option<serde_json::Value>,
}

#[utoipa::path(
    get,
    path = "/api/memberships",
    responses(
        (status = 200, description = "List all plans, cheapest first", body = Vec<MembershipModel>),
    ),
    tag = "memberships"
)]
pub async fn list_memberships(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = MembershipService::new(db);
    let plans = service.list().await?;
    let count = plans.len();
    Ok(ApiResponse::list(plans, count))
}

#[utoipa::path(
    get,
    path = "/api/memberships/{id}",
    params(("id" = i32, Path, description = "Membership ID")),
    responses(
        (status = 200, description = "Plan details", body = MembershipModel),
        (status = 404, description = "Membership not found", body = AppError),
    ),
    tag = "memberships"
)]
pub async fn get_membership(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = MembershipService::new(db);
    let plan = service.get(id).await?;
    Ok(ApiResponse::ok(plan))
}

#[utoipa::path(
    post,
    path = "/api/memberships",
    security(("jwt_token" = [])),
    request_body = MembershipRequest,
    responses(
        (status = 201, description = "Plan created", body = MembershipModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "memberships"
)]
pub async fn create_membership(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<MembershipRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = MembershipService::new(db);
    let plan = service
        .create(
            &payload.name,
            payload.duration,
            payload.price,
            payload.features.unwrap_or_else(|| serde_json::json!([])),
        )
        .await?;

    Ok((axum::http::StatusCode::CREATED, ApiResponse::ok(plan)))
}

#[utoipa::path(
    put,
    path = "/api/memberships/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Membership ID")),
    request_body = MembershipRequest,
    responses(
        (status = 200, description = "Plan updated", body = MembershipModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Membership not found", body = AppError),
    ),
    tag = "memberships"
)]
pub async fn update_membership(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<MembershipRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = MembershipService::new(db);
    let plan = service
        .update(
            id,
            &payload.name,
            payload.duration,
            payload.price,
            payload.features.unwrap_or_else(|| serde_json::json!([])),
        )
        .await?;

    Ok(ApiResponse::ok(plan))
}

#[utoipa::path(
    delete,
    path = "/api/memberships/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Membership ID")),
    responses(
        (status = 200, description = "Plan deleted", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Membership not found", body = AppError),
    ),
    tag = "memberships"
)]
pub async fn delete_membership(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = MembershipService::new(db);
    service.delete(id).await?;

    Ok(ApiResponse::ok(serde_json::json!({})))
}
