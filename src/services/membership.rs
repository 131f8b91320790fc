use crate::{
    error::{AppError, AppResult},
    models::{membership, MembershipModel},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

fn not_found() -> AppError {
    AppError::NotFound("Membership not found".to_string())
}

pub struct MembershipService {
    db: DatabaseConnection,
}

impl MembershipService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Plans ordered cheapest first, the way the pricing page lists them.
    pub async fn list(&self) -> AppResult<Vec<MembershipModel>> {
        Ok(membership::Entity::find()
            .order_by_asc(membership::Column::Price)
            .all(&self.db)
            .await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<MembershipModel> {
        membership::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(
        &self,
        name: &str,
        duration: i32,
        price: f64,
        features: serde_json::Value,
    ) -> AppResult<MembershipModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_plan = membership::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            duration: sea_orm::ActiveValue::Set(duration),
            price: sea_orm::ActiveValue::Set(price),
            features: sea_orm::ActiveValue::Set(features),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(new_plan.insert(&self.db).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        duration: i32,
        price: f64,
        features: serde_json::Value,
    ) -> AppResult<MembershipModel> {
        let existing = self.get(id).await?;

        let mut active: membership::ActiveModel = existing.into();
        active.name = sea_orm::ActiveValue::Set(name.to_string());
        active.duration = sea_orm::ActiveValue::Set(duration);
        active.price = sea_orm::ActiveValue::Set(price);
        active.features = sea_orm::ActiveValue::Set(features);

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get(id).await?;
        membership::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
