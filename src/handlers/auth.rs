use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::models::{MembershipModel, UserModel};
use crate::response::{ApiResponse, TokenResponse};
use crate::services::auth::AuthService;
use crate::services::email::EmailService;
use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name (1-50 characters)
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Email address
    #[validate(email)]
    pub email: String,
    /// Password (min 6 characters)
    #[validate(length(min = 6))]
    pub password: String,
    /// Age in years
    #[validate(range(min = 13, max = 120))]
    pub age: Option<i32>,
    /// Free-text fitness goals
    #[serde(default, alias = "fitnessGoals")]
    pub fitness_goals: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    pub email: Option<String>,
    /// User password
    pub password: Option<String>,
}

/// Public view of a user returned by the auth endpoints. The password hash
/// never appears here, and both role encodings are exposed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "roleBase")]
    pub role_base: i32,
}

impl From<&UserModel> for UserSummary {
    fn from(user: &UserModel) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            role_base: user.role_base,
        }
    }
}

/// /auth/me payload: the full user row (sensitive fields skipped by the
/// model's serde attributes) with the membership relation expanded.
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: UserModel,
    pub membership: Option<MembershipModel>,
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, token issued", body = TokenResponse<UserSummary>),
        (status = 400, description = "Validation error or duplicate email", body = AppError),
    ),
    tag = "auth"
)]
pub async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Extension(email_service): Extension<EmailService>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = AuthService::new(db);
    let (user, token) = service
        .register(
            &payload.name,
            &payload.email,
            &payload.password,
            payload.age,
            payload.fitness_goals,
            &email_service,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        TokenResponse::new(token, UserSummary::from(&user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse<UserSummary>),
        (status = 400, description = "Missing email or password", body = AppError),
        (status = 401, description = "Invalid credentials", body = AppError),
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    // Empty strings count as missing, same as an absent field.
    let email = payload.email.as_deref().unwrap_or("");
    let password = payload.password.as_deref().unwrap_or("");
    if email.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let service = AuthService::new(db);
    let (user, token) = service.login(email, password).await?;

    Ok(TokenResponse::new(token, UserSummary::from(&user)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Current user with membership expanded", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn get_current_user(
    Extension(db): Extension<DatabaseConnection>,
    auth_user: AuthUser,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    let (user, membership) = service.get_user_with_membership(auth_user.id).await?;

    Ok(ApiResponse::ok(CurrentUserResponse { user, membership }))
}

#[utoipa::path(
    get,
    path = "/api/auth/logout",
    security(("jwt_token" = [])),
    responses(
        (status = 200, description = "Logout acknowledged", body = serde_json::Value),
        (status = 401, description = "Unauthorized", body = AppError),
    ),
    tag = "auth"
)]
pub async fn logout() -> AppResult<impl IntoResponse> {
    // No server-side session to tear down: the token stays valid until
    // expiry and the client discards its copy.
    Ok(ApiResponse::ok(serde_json::json!({})))
}

// No format check on the email here: lookup by an address that does not
// parse as an email simply finds no user and yields the same 404.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Email address
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/api/auth/forgotpassword",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email sent", body = ApiResponse<String>),
        (status = 404, description = "No user with that email", body = AppError),
        (status = 500, description = "Email could not be sent", body = AppError),
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    Extension(db): Extension<DatabaseConnection>,
    Extension(email_service): Extension<EmailService>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let service = AuthService::new(db);
    service
        .forgot_password(&payload.email, &email_service)
        .await?;

    Ok(ApiResponse::ok("Email sent"))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    /// New password (min 6 characters)
    #[validate(length(min = 6))]
    pub password: String,
}

#[utoipa::path(
    put,
    path = "/api/auth/resetpassword/{resettoken}",
    params(("resettoken" = String, Path, description = "Plaintext reset token from the email link")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset, new token issued", body = TokenResponse<UserSummary>),
        (status = 400, description = "Invalid or expired token", body = AppError),
    ),
    tag = "auth"
)]
pub async fn reset_password(
    Extension(db): Extension<DatabaseConnection>,
    Path(resettoken): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = AuthService::new(db);
    let (user, token) = service.reset_password(&resettoken, &payload.password).await?;

    Ok(TokenResponse::new(token, UserSummary::from(&user)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_summary_exposes_both_role_encodings() {
        let now = chrono::Utc::now().naive_utc();
        let user = UserModel {
            id: 7,
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "hash".to_string(),
            role: "user".to_string(),
            role_base: 1,
            age: None,
            fitness_goals: None,
            reset_password_token: None,
            reset_password_expire: None,
            membership_id: None,
            membership_expiry: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(UserSummary::from(&user)).unwrap();
        assert_eq!(json["roleBase"], 1);
        assert_eq!(json["role"], "user");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn register_request_accepts_camel_case_goals() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@x.com","password":"Passw0rd1","fitnessGoals":"strength"}"#,
        )
        .unwrap();
        assert_eq!(payload.fitness_goals.as_deref(), Some("strength"));
    }

    #[test]
    fn register_request_rejects_short_password() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@x.com","password":"abc"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_request_rejects_out_of_range_age() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@x.com","password":"Passw0rd1","age":7}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"jane@x.com","password":"Passw0rd1","age":30}"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn register_request_rejects_bad_email() {
        let payload: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jane","email":"not-an-email","password":"Passw0rd1"}"#,
        )
        .unwrap();
        assert!(payload.validate().is_err());
    }
}
