use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::ApiResponse;
use axum::response::IntoResponse;

#[utoipa::path(
    post,
    path = "/api/feedback",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Feedback acknowledged", body = serde_json::Value),
        (status = 401, description = "Not authenticated", body = AppError),
    ),
    tag = "feedback"
)]
pub async fn submit_feedback(_auth_user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(ApiResponse::ok(serde_json::json!({
        "message": "Thank you for your feedback"
    })))
}

#[utoipa::path(
    get,
    path = "/api/feedback",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Feedback entries", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "feedback"
)]
pub async fn list_feedback(auth_user: AuthUser) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;
    Ok(ApiResponse::list(Vec::<serde_json::Value>::new(), 0))
}
