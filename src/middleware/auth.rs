use crate::{error::AppError, models::User, utils::jwt::verify_token};
use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response, Extension};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Identity resolved by the auth middleware and attached to the request.
/// Carries both role encodings so the role gate never re-queries.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub role: String,
    pub role_base: i32,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin" || self.role_base == 1
    }
}

/// Bearer token authentication middleware.
///
/// Extracts the token from the Authorization header, verifies signature and
/// expiry, then re-resolves the user against the database. A token whose
/// user has been deleted since issuance is rejected the same as a bad token.
pub async fn auth_middleware(
    Extension(db): Extension<DatabaseConnection>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    let user_id = verify_token(&token).map_err(|_| AppError::Unauthorized)?;

    let user = User::find_by_id(user_id)
        .one(&db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let auth_user = AuthUser {
        id: user.id,
        role: user.role,
        role_base: user.role_base,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = auth_header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Admin gate for role-restricted routes. The 403 message carries both
/// observed role values for audit visibility.
pub fn require_admin(auth_user: &AuthUser) -> crate::error::AppResult<()> {
    if auth_user.is_admin() {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "User role {} (base:{}) is not authorized to access this route",
        auth_user.role, auth_user.role_base
    )))
}

/// Extractor for AuthUser from request extensions
use axum::extract::FromRequestParts;

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
