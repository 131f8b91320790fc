use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::models::TrainerModel;
use crate::response::ApiResponse;
use crate::services::trainer::TrainerService;
use axum::{extract::Path, response::IntoResponse, Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTrainerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
    #[validate(length(min = 1))]
    pub bio: String,
    /// Years of experience
    #[validate(range(min = 0))]
    pub experience: i32,
    /// Weekly schedule ({day, hours} items)
    pub schedule: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTrainerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub specialty: String,
    #[validate(length(min = 1))]
    pub bio: String,
    #[validate(range(min = 0))]
    pub experience: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateScheduleRequest {
    pub schedule: serde_json::Value,
}

#[utoipa::path(
    get,
    path = "/api/trainers",
    responses(
        (status = 200, description = "List all trainers", body = Vec<TrainerModel>),
    ),
    tag = "trainers"
)]
pub async fn list_trainers(
    Extension(db): Extension<DatabaseConnection>,
) -> AppResult<impl IntoResponse> {
    let service = TrainerService::new(db);
    let trainers = service.list().await?;
    let count = trainers.len();
    Ok(ApiResponse::list(trainers, count))
}

#[utoipa::path(
    get,
    path = "/api/trainers/{id}",
    params(("id" = i32, Path, description = "Trainer ID")),
    responses(
        (status = 200, description = "Trainer details", body = TrainerModel),
        (status = 404, description = "Trainer not found", body = AppError),
    ),
    tag = "trainers"
)]
pub async fn get_trainer(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let service = TrainerService::new(db);
    let trainer = service.get(id).await?;
    Ok(ApiResponse::ok(trainer))
}

#[utoipa::path(
    post,
    path = "/api/trainers",
    security(("jwt_token" = [])),
    request_body = CreateTrainerRequest,
    responses(
        (status = 201, description = "Trainer created", body = TrainerModel),
        (status = 400, description = "Validation error", body = AppError),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "trainers"
)]
pub async fn create_trainer(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Json(payload): Json<CreateTrainerRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = TrainerService::new(db);
    let trainer = service
        .create(
            &payload.name,
            &payload.specialty,
            &payload.bio,
            payload.experience,
            payload.schedule.unwrap_or_else(|| serde_json::json!([])),
        )
        .await?;

    Ok((axum::http::StatusCode::CREATED, ApiResponse::ok(trainer)))
}

#[utoipa::path(
    put,
    path = "/api/trainers/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Trainer ID")),
    request_body = UpdateTrainerRequest,
    responses(
        (status = 200, description = "Trainer updated", body = TrainerModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Trainer not found", body = AppError),
    ),
    tag = "trainers"
)]
pub async fn update_trainer(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTrainerRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    require_admin(&auth_user)?;

    let service = TrainerService::new(db);
    let trainer = service
        .update(
            id,
            &payload.name,
            &payload.specialty,
            &payload.bio,
            payload.experience,
        )
        .await?;

    Ok(ApiResponse::ok(trainer))
}

#[utoipa::path(
    put,
    path = "/api/trainers/{id}/schedule",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Trainer ID")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule replaced", body = TrainerModel),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Trainer not found", body = AppError),
    ),
    tag = "trainers"
)]
pub async fn update_schedule(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = TrainerService::new(db);
    let trainer = service.update_schedule(id, payload.schedule).await?;

    Ok(ApiResponse::ok(trainer))
}

#[utoipa::path(
    delete,
    path = "/api/trainers/{id}",
    security(("jwt_token" = [])),
    params(("id" = i32, Path, description = "Trainer ID")),
    responses(
        (status = 200, description = "Trainer deleted", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
        (status = 404, description = "Trainer not found", body = AppError),
    ),
    tag = "trainers"
)]
pub async fn delete_trainer(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;

    let service = TrainerService::new(db);
    service.delete(id).await?;

    Ok(ApiResponse::ok(serde_json::json!({})))
}
