use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::{GymClassModel, TrainerModel};
use crate::response::ApiResponse;
use crate::services::gym_class::GymClassService;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassRequest {
    /// Class name (1-100 characters)
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Class description
    #[validate(length(min = 1))]
    pub description: String,
    /// Duration in minutes
    #[validate(range(min = 1))]
    pub duration: i32,
    /// Assigned trainer
    pub trainer_id: Option<i32>,
    /// Exercise steps ({timeElapsed, exercise, instructions, reps} items)
    pub routine: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1))]
    pub duration: i32,
    pub trainer_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoutineRequest {
    pub routine: serde_json::Value,
}

/// Catalog view of a class with its trainer expanded.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub duration: i32,
    pub routine: serde_json::Value,
    pub trainer: Option<TrainerModel>,
    pub created_at: String,
}

impl From<(GymClassModel, Option<TrainerModel>)> for ClassResponse {
    fn from((class, trainer): (GymClassModel, Option<TrainerModel>)) -> Self {
        Self {
            id: class.id,
            name: class.name,
            description: class.description,
            image: class.image,
            duration: class.duration,
            routine: class.routine,
            trainer,
            created_at: class.created_at.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "List all classes", body = Vec<ClassResponse>),
    ),
    tag = "classes"
)]
pub async fn list_classes(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = GymClassService::new(db);
    let classes = service.list().await?;
    let response: Vec<ClassResponse> = classes.into_iter().map(ClassResponse::from).collect();
    let count = response.len();
    Ok(ApiResponse::list(response, count))
}

#[utoipa::path(
    get,
    path = "/api/classes/{id}",
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class details", body = ClassResponse),
        (status = 404, description = "Class not found", body = AppError),
    ),
    tag = "classes"
)]
pub async fn get_class(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = GymClassService::new(db);
    let class = service.get(id).await?;
    Ok(ApiResponse::ok(ClassResponse::from(class)))
}

#[utoipa::path(
    post,
    path = "/api/classes",
    security(("jwt_token" = [])),
    request_body = CreateClassRequest,
    responses(
        (status = 201, description = "Class created", body = GymClassModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "classes"
)]
pub async fn create_class(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateClassRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = GymClassService::new(db);
    let class = service
        .create(
            &payload.name,
            &payload.description,
            payload.duration,
            payload.trainer_id,
            payload.routine.unwrap_or_else(|| serde_json::json!([])),
        )
        .await?;

    Ok((axum::http::StatusCode::CREATED, ApiResponse::ok(class)))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Class ID")),
    request_body = UpdateClassRequest,
    responses(
        (status = 200, description = "Class updated", body = GymClassModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Class not found", body = AppError),
    ),
    tag = "classes"
)]
pub async fn update_class(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateClassRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = GymClassService::new(db);
    let class = service
        .update(
            id,
            &payload.name,
            &payload.description,
            payload.duration,
            payload.trainer_id,
        )
        .await?;

    Ok(ApiResponse::ok(class))
}

#[utoipa::path(
    put,
    path = "/api/classes/{id}/routine",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Class ID")),
    request_body = UpdateRoutineRequest,
    responses(
        (status = 200, description = "Routine replaced", body = GymClassModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Class not found", body = AppError),
    ),
    tag = "classes"
)]
pub async fn update_routine(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoutineRequest>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = GymClassService::new(db);
    let class = service.update_routine(id, payload.routine).await?;

    Ok(ApiResponse::ok(class))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Class ID")),
    responses(
        (status = 200, description = "Class deleted", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Class not found", body = AppError),
    ),
    tag = "classes"
)]
pub async fn delete_class(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = GymClassService::new(db);
    service.delete(id).await?;

    Ok(ApiResponse::ok(serde_json::json!({})))
}
