use crate::{
    error::AppResult,
    models::{contact, ContactModel},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

pub struct ContactService {
    db: DatabaseConnection,
}

impl ContactService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, name: &str, email: &str, message: &str) -> AppResult<ContactModel> {
        let now = chrono::Utc::now().naive_utc();

        let submission = contact::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            email: sea_orm::ActiveValue::Set(email.to_string()),
            message: sea_orm::ActiveValue::Set(message.to_string()),
            is_read: sea_orm::ActiveValue::Set(false),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(submission.insert(&self.db).await?)
    }

    /// Submissions newest first, for the admin inbox.
    pub async fn list(&self) -> AppResult<Vec<ContactModel>> {
        Ok(contact::Entity::find()
            .order_by_desc(contact::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
