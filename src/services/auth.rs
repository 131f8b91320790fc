use crate::{
    error::{AppError, AppResult},
    models::{membership, user, MembershipModel, User, UserModel},
    services::email::EmailService,
    utils::{generate_reset_token, hash_password, hash_reset_token, verify_password},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// Reset tokens are short-lived; a new forgot-password request overwrites
/// any previous token (latest request wins).
const RESET_TOKEN_TTL_MINUTES: i64 = 10;

pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new user. Returns (user_model, bearer_token).
    ///
    /// The welcome email is dispatched on a detached task: delivery failure
    /// is logged inside the task and never reaches the caller.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        age: Option<i32>,
        fitness_goals: Option<String>,
        email_service: &EmailService,
    ) -> AppResult<(UserModel, String)> {
        let taken = User::find()
            .filter(user::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        if taken > 0 {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = hash_password(password)?;
        let now = chrono::Utc::now().naive_utc();

        let new_user = user::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            email: sea_orm::ActiveValue::Set(email.to_string()),
            password_hash: sea_orm::ActiveValue::Set(password_hash),
            role: sea_orm::ActiveValue::Set("user".to_string()),
            role_base: sea_orm::ActiveValue::Set(0),
            age: sea_orm::ActiveValue::Set(age),
            fitness_goals: sea_orm::ActiveValue::Set(fitness_goals),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let created = new_user.insert(&self.db).await?;

        let service = email_service.clone();
        let to = created.email.clone();
        let user_name = created.name.clone();
        tokio::spawn(async move {
            if let Err(e) = service.send_welcome_email(&to, &user_name).await {
                tracing::warn!("Failed to send welcome email to {to}: {e}");
            }
        });

        let token = crate::utils::encode_token(created.id)?;
        Ok((created, token))
    }

    /// Login with email and password. Unknown email and wrong password
    /// produce the same error so the response leaks nothing.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(UserModel, String)> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let is_valid = verify_password(password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = crate::utils::encode_token(user.id)?;
        Ok((user, token))
    }

    pub async fn get_user_by_id(&self, id: i32) -> AppResult<UserModel> {
        User::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Current user with the membership relation expanded, for /auth/me.
    pub async fn get_user_with_membership(
        &self,
        id: i32,
    ) -> AppResult<(UserModel, Option<MembershipModel>)> {
        User::find_by_id(id)
            .find_also_related(membership::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Generate a reset token for the given email, persist its hash and
    /// expiry on the user, and return the plaintext for out-of-band
    /// delivery. A previously issued token is silently superseded.
    pub async fn issue_reset_token(&self, email: &str) -> AppResult<String> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("There is no user with that email".to_string()))?;

        let plaintext = generate_reset_token()?;
        let now = chrono::Utc::now().naive_utc();
        let expires = now + chrono::Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        let mut active: user::ActiveModel = user.into();
        active.reset_password_token = sea_orm::ActiveValue::Set(Some(hash_reset_token(&plaintext)));
        active.reset_password_expire = sea_orm::ActiveValue::Set(Some(expires));
        active.updated_at = sea_orm::ActiveValue::Set(now);
        active.update(&self.db).await?;

        Ok(plaintext)
    }

    /// Forgot-password flow: 404 when the email is unknown; otherwise
    /// persist a reset token and email it. Unlike the welcome email, the
    /// send is awaited: a delivery failure clears the half-written token
    /// pair before surfacing, so no valid-but-undeliverable token lingers.
    pub async fn forgot_password(
        &self,
        email: &str,
        email_service: &EmailService,
    ) -> AppResult<()> {
        let plaintext = self.issue_reset_token(email).await?;

        if let Err(e) = email_service
            .send_password_reset_email(email, &plaintext)
            .await
        {
            tracing::error!("Failed to send password reset email to {email}: {e}");
            self.clear_reset_token(email).await?;
            return Err(AppError::EmailDelivery);
        }

        Ok(())
    }

    /// Consume a reset token: the supplied plaintext must hash to the
    /// stored value and the stored expiry must be in the future. On any
    /// failure the stored fields are left untouched, so a wrong guess does
    /// not burn the real token. Returns the user and a fresh bearer token.
    pub async fn reset_password(
        &self,
        plaintext_token: &str,
        new_password: &str,
    ) -> AppResult<(UserModel, String)> {
        let token_hash = hash_reset_token(plaintext_token);

        let user = User::find()
            .filter(user::Column::ResetPasswordToken.eq(token_hash))
            .one(&self.db)
            .await?
            .ok_or(AppError::InvalidResetToken)?;

        let now = chrono::Utc::now().naive_utc();
        match user.reset_password_expire {
            Some(expires) if expires > now => {}
            _ => return Err(AppError::InvalidResetToken),
        }

        let new_hash = hash_password(new_password)?;
        let user_id = user.id;
        let mut active: user::ActiveModel = user.into();
        active.password_hash = sea_orm::ActiveValue::Set(new_hash);
        active.reset_password_token = sea_orm::ActiveValue::Set(None);
        active.reset_password_expire = sea_orm::ActiveValue::Set(None);
        active.updated_at = sea_orm::ActiveValue::Set(now);
        let updated = active.update(&self.db).await?;

        let token = crate::utils::encode_token(user_id)?;
        Ok((updated, token))
    }

    async fn clear_reset_token(&self, email: &str) -> AppResult<()> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        if let Some(user) = user {
            let now = chrono::Utc::now().naive_utc();
            let mut active: user::ActiveModel = user.into();
            active.reset_password_token = sea_orm::ActiveValue::Set(None);
            active.reset_password_expire = sea_orm::ActiveValue::Set(None);
            active.updated_at = sea_orm::ActiveValue::Set(now);
            active.update(&self.db).await?;
        }

        Ok(())
    }
}
