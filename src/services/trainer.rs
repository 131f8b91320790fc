use crate::{
    error::{AppError, AppResult},
    models::{trainer, TrainerModel},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

fn not_found() -> AppError {
    AppError::NotFound("Trainer not found".to_string())
}

pub struct TrainerService {
    db: DatabaseConnection,
}

impl TrainerService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<TrainerModel>> {
        Ok(trainer::Entity::find().all(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<TrainerModel> {
        trainer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn create(
        &self,
        name: &str,
        specialty: &str,
        bio: &str,
        experience: i32,
        schedule: serde_json::Value,
    ) -> AppResult<TrainerModel> {
        let now = chrono::Utc::now().naive_utc();

        let new_trainer = trainer::ActiveModel {
            name: sea_orm::ActiveValue::Set(name.to_string()),
            photo: sea_orm::ActiveValue::Set("default-trainer.jpg".to_string()),
            specialty: sea_orm::ActiveValue::Set(specialty.to_string()),
            bio: sea_orm::ActiveValue::Set(bio.to_string()),
            experience: sea_orm::ActiveValue::Set(experience),
            schedule: sea_orm::ActiveValue::Set(schedule),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(new_trainer.insert(&self.db).await?)
    }

    pub async fn update(
        &self,
        id: i32,
        name: &str,
        specialty: &str,
        bio: &str,
        experience: i32,
    ) -> AppResult<TrainerModel> {
        let existing = self.get(id).await?;

        let mut active: trainer::ActiveModel = existing.into();
        active.name = sea_orm::ActiveValue::Set(name.to_string());
        active.specialty = sea_orm::ActiveValue::Set(specialty.to_string());
        active.bio = sea_orm::ActiveValue::Set(bio.to_string());
        active.experience = sea_orm::ActiveValue::Set(experience);

        Ok(active.update(&self.db).await?)
    }

    pub async fn update_schedule(
        &self,
        id: i32,
        schedule: serde_json::Value,
    ) -> AppResult<TrainerModel> {
        let existing = self.get(id).await?;

        let mut active: trainer::ActiveModel = existing.into();
        active.schedule = sea_orm::ActiveValue::Set(schedule);

        Ok(active.update(&self.db).await?)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get(id).await?;
        trainer::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
