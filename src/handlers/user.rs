use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::{GymClassModel, UserModel};
use crate::response::{ApiResponse, PaginatedResponse, PaginationQuery};
use crate::services::user::{UserService, UserUpdate};
use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(range(min = 13, max = 120))]
    pub age: Option<i32>,
    #[serde(default, alias = "fitnessGoals")]
    pub fitness_goals: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminCreateUserRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
    /// "user" or "admin"
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default, alias = "roleBase")]
    pub role_base: i32,
}

fn default_role() -> String {
    "user".to_string()
}

/// Admin user update. Absent fields are left untouched; membership fields
/// use a nested Option so `null` clears and absence skips.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(default, alias = "roleBase")]
    pub role_base: Option<i32>,
    pub age: Option<i32>,
    #[serde(default, alias = "fitnessGoals")]
    pub fitness_goals: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::response::deserialize_some",
        alias = "membershipId"
    )]
    pub membership_id: Option<Option<i32>>,
    #[serde(
        default,
        deserialize_with = "crate::response::deserialize_some",
        alias = "membershipExpiry"
    )]
    pub membership_expiry: Option<Option<NaiveDateTime>>,
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    security(("jwt_token" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserModel),
        (status = 400, description = "Validation error", body = AppError),
    ),
    tag = "users"
)]
pub async fn update_profile(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = UserService::new(db);
    let user = service
        .update_profile(auth_user.id, payload.name, payload.age, payload.fitness_goals)
        .await?;

    Ok(ApiResponse::ok(user))
}

#[utoipa::path(
    put,
    path = "/api/users/enroll/{class_id}",
    security(("jwt_token" = [])),
    params(("class_id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Enrolled (idempotent)", body = GymClassModel),
        (status = 404, description = "Class not found", body = AppError),
    ),
    tag = "users"
)]
pub async fn enroll_in_class(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(class_id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = UserService::new(db);
    let class = service.enroll(auth_user.id, class_id).await?;
    Ok(ApiResponse::ok(class))
}

#[utoipa::path(
    get,
    path = "/api/users/me/classes",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Classes the caller is enrolled in", body = Vec<GymClassModel>),
    ),
    tag = "users"
)]
pub async fn my_classes(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let service = UserService::new(db);
    let classes = service.enrolled_classes(auth_user.id).await?;
    let count = classes.len();
    Ok(ApiResponse::list(classes, count))
}

#[utoipa::path(
    get,
    path = "/api/users",
    security(("jwt_token" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Paginated user list", body = PaginatedResponse<UserModel>),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "users"
)]
pub async fn list_users(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Query(pagination): Query<PaginationQuery>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let page = pagination.page.unwrap_or(1).max(1);
    let per_page = pagination.per_page.unwrap_or(20).clamp(1, 100);

    let service = UserService::new(db);
    let (users, total) = service.list(page, per_page).await?;

    Ok(Json(PaginatedResponse::new(users, total, page, per_page)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "User not found", body = AppError),
    ),
    tag = "users"
)]
pub async fn get_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = UserService::new(db);
    let user = service.get(id).await?;
    Ok(ApiResponse::ok(user))
}

#[utoipa::path(
    post,
    path = "/api/users",
    security(("jwt_token" = [])),
    request_body = AdminCreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserModel),
        (status = 400, description = "Email already registered", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "users"
)]
pub async fn create_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<AdminCreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = UserService::new(db);
    let user = service
        .create(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.role,
            payload.role_base,
        )
        .await?;

    Ok((axum::http::StatusCode::CREATED, ApiResponse::ok(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = AdminUpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "User not found", body = AppError),
    ),
    tag = "users"
)]
pub async fn update_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<AdminUpdateUserRequest>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = UserService::new(db);
    let user = service
        .update(
            id,
            UserUpdate {
                name: payload.name,
                email: payload.email,
                role: payload.role,
                role_base: payload.role_base,
                age: payload.age,
                fitness_goals: payload.fitness_goals,
                membership_id: payload.membership_id,
                membership_expiry: payload.membership_expiry,
            },
        )
        .await?;

    Ok(ApiResponse::ok(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "User not found", body = AppError),
    ),
    tag = "users"
)]
pub async fn delete_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = UserService::new(db);
    service.delete(id).await?;

    Ok(ApiResponse::ok(serde_json::json!({})))
}
