use std::env;

const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// Base URL used when building links in outgoing mail. Needed even when
/// SMTP itself is not configured.
pub fn frontend_url() -> String {
    env::var("FRONTEND_URL").unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string())
}

#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_address: String,
    pub frontend_url: String,
}

impl EmailConfig {
    /// Read SMTP settings from the environment. Returns None when any of
    /// SMTP_HOST, SMTP_USERNAME or SMTP_PASSWORD is absent, in which case
    /// the service runs without outgoing mail (graceful degradation).
    pub fn from_env() -> Option<Self> {
        let smtp_host = env::var("SMTP_HOST").ok()?;
        let smtp_username = env::var("SMTP_USERNAME").ok()?;
        let smtp_password = env::var("SMTP_PASSWORD").ok()?;

        let smtp_port = match env::var("SMTP_PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid SMTP_PORT '{raw}', using {DEFAULT_SMTP_PORT}");
                DEFAULT_SMTP_PORT
            }),
            Err(_) => DEFAULT_SMTP_PORT,
        };

        let from_address =
            env::var("SMTP_FROM").unwrap_or_else(|_| format!("FITIN5 <{smtp_username}>"));

        Some(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
            frontend_url: frontend_url(),
        })
    }
}
