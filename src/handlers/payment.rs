use crate::error::{AppError, AppResult};
use crate::middleware::auth::{require_admin, AuthUser};
use crate::response::ApiResponse;
use axum::response::IntoResponse;

// Payment routes predate any gateway integration and still answer with
// static acknowledgments so clients keep a stable surface.

#[utoipa::path(
    post,
    path = "/api/payments",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Payment acknowledged", body = serde_json::Value),
        (status = 401, description = "Not authenticated", body = AppError),
    ),
    tag = "payments"
)]
pub async fn create_payment(_auth_user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(ApiResponse::ok(serde_json::json!({
        "message": "Payment processing is not yet available"
    })))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Payment history", body = serde_json::Value),
        (status = 403, description = "Admin only", body = AppError),
    ),
    tag = "payments"
)]
pub async fn list_payments(auth_user: AuthUser) -> AppResult<impl IntoResponse> {
    require_admin(&auth_user)?;
    Ok(ApiResponse::list(Vec::<serde_json::Value>::new(), 0))
}
