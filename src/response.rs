use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: Option<T>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
        }
    }

    /// List envelope carrying the item count alongside the data, the way
    /// the collection endpoints report it.
    pub fn list(data: T, count: usize) -> Self {
        Self {
            success: true,
            count: Some(count),
            data: Some(data),
        }
    }
}

/// Auth success envelope. The user summary is intentionally duplicated under
/// both `user` and `data`: existing clients read one or the other.
#[derive(Serialize, ToSchema)]
pub struct TokenResponse<T: Serialize + Clone> {
    pub success: bool,
    pub token: String,
    pub user: T,
    pub data: T,
}

impl<T: Serialize + Clone> TokenResponse<T> {
    pub fn new(token: String, user: T) -> Self {
        Self {
            success: true,
            token,
            data: user.clone(),
            user,
        }
    }
}

impl<T: Serialize + Clone> IntoResponse for TokenResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Distinguishes an absent field from an explicit `null` when wrapped in a
/// double Option with `#[serde(default)]`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T: Serialize> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}
