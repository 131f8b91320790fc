use crate::config::email::EmailConfig;
use anyhow::Result;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: Option<String>,
    frontend_url: String,
}

impl EmailService {
    /// Build from environment variables. If SMTP is not configured, email
    /// sending is silently skipped (graceful degradation).
    pub fn from_env() -> Self {
        match EmailConfig::from_env() {
            Some(cfg) => Self::with_config(cfg),
            None => Self {
                transport: None,
                from_address: None,
                frontend_url: crate::config::email::frontend_url(),
            },
        }
    }

    pub fn with_config(cfg: EmailConfig) -> Self {
        let creds = Credentials::new(cfg.smtp_username.clone(), cfg.smtp_password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)
            .map(|builder| builder.port(cfg.smtp_port).credentials(creds).build());

        match transport {
            Ok(t) => Self {
                transport: Some(t),
                from_address: Some(cfg.from_address),
                frontend_url: cfg.frontend_url,
            },
            Err(e) => {
                tracing::warn!("Failed to build SMTP transport: {e}");
                Self {
                    transport: None,
                    from_address: None,
                    frontend_url: cfg.frontend_url,
                }
            }
        }
    }

    /// Returns true if SMTP is configured and available.
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Welcome message sent after registration. Callers treat this as
    /// best-effort; a failure here must never fail the request.
    pub async fn send_welcome_email(&self, to: &str, name: &str) -> Result<()> {
        let body = format!(
            "Hello {},\n\nThank you for registering with FITIN5. We're excited to have you join our fitness community!\n\nGet started by exploring our classes and membership options.\n\nBest regards,\nThe FITIN5 Team",
            name
        );

        self.send_email(to, "Welcome to FITIN5", &body).await
    }

    /// Password reset message carrying the plaintext token. Unlike the
    /// welcome email, the caller awaits this and fails the request (with
    /// cleanup) when it errors.
    pub async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<()> {
        let link = format!("{}/resetpassword/{}", self.frontend_url, token);
        let body = format!(
            "You are receiving this email because you (or someone else) has requested the reset of a password.\n\nFollow the link below to choose a new password:\n\n{}\n\nThis link expires in 10 minutes. If you did not request this, you can safely ignore this email.",
            link
        );

        self.send_email(to, "Password reset token", &body).await
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let transport = match &self.transport {
            Some(t) => t,
            None => {
                tracing::debug!("SMTP not configured, skipping email to {to}");
                return Ok(());
            }
        };
        let from_address = match &self.from_address {
            Some(f) => f,
            None => return Ok(()),
        };

        let from_mailbox: Mailbox =
            from_address
                .parse()
                .map_err(|e: lettre::address::AddressError| {
                    anyhow::anyhow!("Invalid from address '{}': {}", from_address, e)
                })?;
        let to_mailbox: Mailbox = to.parse().map_err(|e: lettre::address::AddressError| {
            anyhow::anyhow!("Invalid to address '{}': {}", to, e)
        })?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        transport.send(email).await?;
        tracing::info!("Email sent to {to}: {subject}");
        Ok(())
    }
}
