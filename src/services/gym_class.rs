use crate::{
    error::{AppError, AppResult},
    models::{gym_class, trainer, GymClassModel, TrainerModel},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

fn not_found() -> AppError {
    AppError::NotFound("Class not found".to_string())
}

pub struct GymClassService {
    db: DatabaseConnection,
}

impl GymClassService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All classes with their trainer expanded, catalog order.
    pub async fn list(&self) -> AppResult<Vec<(GymClassModel, Option<TrainerModel>)>> {
        let classes = gym_class::Entity::find()
            .find_also_related(trainer::Entity)
            .all(&self.db)
            .await?;
        Ok(classes)
    }

    pub async fn get(&self, id: i32) -> AppResult<(GymClassModel, Option<TrainerModel>)> {
        gym_class::Entity::find_by_id(id)
            .find_also_related(trainer::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(
        &self,
        name: &str,
        description: &str,
        duration: i32,
        trainer_id: Option<i32>,
        routine: serde_json::Value,
    ) -> AppResult<GymClassModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_class = gym_class::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            description: sea_orm::ActiveValue::Set(description.to_string()),
            image: sea_orm::ActiveValue::Set("default-class.jpg".to_string()),
            duration: sea_orm::ActiveValue::Set(duration),
            trainer_id: sea_orm::ActiveValue::Set(trainer_id),
            routine: sea_orm::ActiveValue::Set(routine),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(new_class.insert(&self.db).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        description: &str,
        duration: i32,
        trainer_id: Option<i32>,
    ) -> AppResult<GymClassModel> {
        let existing = gym_class::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)?;

        let mut active: gym_class::ActiveModel = existing.into();
        active.name = sea_orm::ActiveValue::Set(name.to_string());
        active.description = sea_orm::ActiveValue::Set(description.to_string());
        active.duration = sea_orm::ActiveValue::Set(duration);
        active.trainer_id = sea_orm::ActiveValue::Set(trainer_id);

        Ok(active.update(&self.db).await?)
    }

    pub async fn update_routine(
        &self,
        id: i32,
        routine: serde_json::Value,
    ) -> AppResult<GymClassModel> {
        let existing = gym_class::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)?;

        let mut active: gym_class::ActiveModel = existing.into();
        active.routine = sea_orm::ActiveValue::Set(routine);

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = gym_class::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)?;

        gym_class::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
