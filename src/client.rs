//! Thin HTTP client holding authenticated session state, for native
//! front-ends and scripted API consumers.

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// User summary as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "roleBase")]
    pub role_base: i32,
}

/// Client-side authentication state. Mirrors the server's session model:
/// holding a token is the session, so logout only clears local state.
#[derive(Debug)]
pub struct AuthContext {
    base_url: String,
    http: Client,
    pub user: Option<ClientUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthEnvelope {
    success: bool,
    token: Option<String>,
    user: Option<ClientUser>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct DataEnvelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl AuthContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Client::new(),
            user: None,
            token: None,
            is_authenticated: false,
            loading: false,
            error: None,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn apply_auth(&mut self, envelope: AuthEnvelope) -> bool {
        if envelope.success {
            self.token = envelope.token;
            self.user = envelope.user;
            self.is_authenticated = self.token.is_some();
            self.error = None;
            self.is_authenticated
        } else {
            self.error = Some(
                envelope
                    .error
                    .unwrap_or_else(|| "Authentication failed".to_string()),
            );
            false
        }
    }

    fn fail(&mut self, err: reqwest::Error) -> bool {
        self.error = Some(format!("Network error: {}", err));
        self.loading = false;
        false
    }

    /// Register a new account. On success the session is established
    /// immediately from the returned token.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> bool {
        self.loading = true;
        let result = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&RegisterPayload {
                name,
                email,
                password,
            })
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return self.fail(e),
        };
        let envelope: AuthEnvelope = match response.json().await {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        self.loading = false;
        self.apply_auth(envelope)
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        self.loading = true;
        let result = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginPayload { email, password })
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return self.fail(e),
        };
        let envelope: AuthEnvelope = match response.json().await {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        self.loading = false;
        self.apply_auth(envelope)
    }

    /// Refresh the cached user from `/api/auth/me`. A rejected token
    /// clears the session.
    pub async fn load_user(&mut self) -> bool {
        let token = match &self.token {
            Some(t) => t.clone(),
            None => return false,
        };

        self.loading = true;
        let result = self
            .http
            .get(self.url("/api/auth/me"))
            .bearer_auth(&token)
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return self.fail(e),
        };
        let envelope: DataEnvelope<ClientUser> = match response.json().await {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        self.loading = false;
        if envelope.success {
            self.user = envelope.data;
            self.is_authenticated = true;
            true
        } else {
            self.logout();
            self.error = envelope.error;
            false
        }
    }

    pub async fn forgot_password(&mut self, email: &str) -> bool {
        self.loading = true;
        let result = self
            .http
            .post(self.url("/api/auth/forgotpassword"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return self.fail(e),
        };
        let envelope: DataEnvelope<String> = match response.json().await {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        self.loading = false;
        if envelope.success {
            self.error = None;
            true
        } else {
            self.error = envelope.error;
            false
        }
    }

    /// Completes the reset flow and signs in with the fresh token.
    pub async fn reset_password(&mut self, reset_token: &str, password: &str) -> bool {
        self.loading = true;
        let result = self
            .http
            .put(self.url(&format!("/api/auth/resetpassword/{}", reset_token)))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => return self.fail(e),
        };
        let envelope: AuthEnvelope = match response.json().await {
            Ok(e) => e,
            Err(e) => return self.fail(e),
        };

        self.loading = false;
        self.apply_auth(envelope)
    }

    /// Local-only teardown; the server keeps no session state to revoke.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.is_authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_signed_out() {
        let ctx = AuthContext::new("http://localhost:3000");
        assert!(!ctx.is_authenticated);
        assert!(ctx.user.is_none());
        assert!(ctx.token.is_none());
    }

    #[test]
    fn logout_clears_session() {
        let mut ctx = AuthContext::new("http://localhost:3000");
        ctx.token = Some("tok".to_string());
        ctx.is_authenticated = true;
        ctx.logout();
        assert!(!ctx.is_authenticated);
        assert!(ctx.token.is_none());
    }

    #[test]
    fn clear_error_resets_only_error() {
        let mut ctx = AuthContext::new("http://localhost:3000");
        ctx.error = Some("boom".to_string());
        ctx.token = Some("tok".to_string());
        ctx.clear_error();
        assert!(ctx.error.is_none());
        assert!(ctx.token.is_some());
    }
}
