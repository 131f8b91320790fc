use crate::error::AppResult;
use crate::models::{user, User};
use crate::utils::hash_password;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::env;

#[derive(Debug, Clone)]
pub struct BootstrapAdminConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl BootstrapAdminConfig {
    pub fn from_env() -> Option<Self> {
        let enabled = env::var("BOOTSTRAP_ADMIN_ENABLED")
            .ok()
            .map(|v| v.trim().to_ascii_lowercase())
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "y" | "on"))
            .unwrap_or(false);

        if !enabled {
            return None;
        }

        Some(Self {
            name: env::var("BOOTSTRAP_ADMIN_NAME").ok()?,
            email: env::var("BOOTSTRAP_ADMIN_EMAIL").ok()?,
            password: env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?,
        })
    }
}

/// Ensure an admin account exists at startup:
/// - if any admin already exists, do nothing
/// - else if the configured email exists, promote it
/// - else create a fresh admin
///
/// Admins are written with both encodings (role="admin", role_base=1) so
/// either check path recognizes them.
pub async fn ensure_bootstrap_admin(db: &DatabaseConnection) -> AppResult<()> {
    let Some(cfg) = BootstrapAdminConfig::from_env() else {
        return Ok(());
    };

    let admin_exists = User::find()
        .filter(
            sea_orm::Condition::any()
                .add(user::Column::Role.eq("admin"))
                .add(user::Column::RoleBase.eq(1)),
        )
        .one(db)
        .await?
        .is_some();
    if admin_exists {
        return Ok(());
    }

    let existing = User::find()
        .filter(user::Column::Email.eq(cfg.email.clone()))
        .one(db)
        .await?;

    let now = chrono::Utc::now().naive_utc();

    if let Some(user) = existing {
        let mut active: user::ActiveModel = user.into();
        active.role = sea_orm::ActiveValue::Set("admin".to_string());
        active.role_base = sea_orm::ActiveValue::Set(1);
        active.updated_at = sea_orm::ActiveValue::Set(now);
        active.update(db).await?;
        tracing::info!("Promoted {} to admin", cfg.email);
        return Ok(());
    }

    let password_hash = hash_password(&cfg.password)?;

    let new_user = user::ActiveModel {
        name: sea_orm::ActiveValue::Set(cfg.name),
        email: sea_orm::ActiveValue::Set(cfg.email.clone()),
        password_hash: sea_orm::ActiveValue::Set(password_hash),
        role: sea_orm::ActiveValue::Set("admin".to_string()),
        role_base: sea_orm::ActiveValue::Set(1),
        created_at: sea_orm::ActiveValue::Set(now),
        updated_at: sea_orm::ActiveValue::Set(now),
        ..Default::default()
    };

    new_user.insert(db).await?;
    tracing::info!("Created bootstrap admin {}", cfg.email);
    Ok(())
}
