use crate::{
    error::{AppError, AppResult},
    models::{class_enrollment, gym_class, user, ClassEnrollment, GymClassModel, UserModel},
    utils::hash_password,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect, RelationTrait,
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

/// Admin-side field set; None leaves the stored value unchanged.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub role_base: Option<i32>,
    pub age: Option<i32>,
    pub fitness_goals: Option<String>,
    pub membership_id: Option<Option<i32>>,
    pub membership_expiry: Option<Option<chrono::NaiveDateTime>>,
}

pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, id: i32) -> AppResult<UserModel> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(user_not_found)
    }

    pub async fn list(&self, page: u64, per_page: u64) -> AppResult<(Vec<UserModel>, u64)> {
        let paginator = user::Entity::find().paginate(&self.db, per_page);
        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((users, total))
    }

    /// Admin user creation; unlike registration the role is caller-chosen.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        role_base: i32,
    ) -> AppResult<UserModel> {
        let taken = user::Entity::find()
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
            role: sea_orm::ActiveValue::Set(role.to_string()),
            role_base: sea_orm::ActiveValue::Set(role_base),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(new_user.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, update: UserUpdate) -> AppResult<UserModel> {
        let existing = self.get(id).await?;
        let now = chrono::Utc::now().naive_utc();

        let mut active: user::ActiveModel = existing.into();
        if let Some(name) = update.name {
            active.name = sea_orm::ActiveValue::Set(name);
        }
        if let Some(email) = update.email {
            active.email = sea_orm::ActiveValue::Set(email);
        }
        if let Some(role) = update.role {
            active.role = sea_orm::ActiveValue::Set(role);
        }
        if let Some(role_base) = update.role_base {
            active.role_base = sea_orm::ActiveValue::Set(role_base);
        }
        if let Some(age) = update.age {
            active.age = sea_orm::ActiveValue::Set(Some(age));
        }
        if let Some(goals) = update.fitness_goals {
            active.fitness_goals = sea_orm::ActiveValue::Set(Some(goals));
        }
        if let Some(membership_id) = update.membership_id {
            active.membership_id = sea_orm::ActiveValue::Set(membership_id);
        }
        if let Some(expiry) = update.membership_expiry {
            active.membership_expiry = sea_orm::ActiveValue::Set(expiry);
        }
        active.updated_at = sea_orm::ActiveValue::Set(now);

        Ok(active.update(&self.db).await?)
    }

    /// Self-service profile update: only name, age and fitness goals.
    pub async fn update_profile(
        &self,
        id: i32,
        name: Option<String>,
        age: Option<i32>,
        fitness_goals: Option<String>,
    ) -> AppResult<UserModel> {
        self.update(
            id,
            UserUpdate {
                name,
                age,
                fitness_goals,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let existing = self.get(id).await?;
        user::Entity::delete_by_id(existing.id)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Enroll a user in a class. Re-enrolling is a no-op, not an error.
    pub async fn enroll(&self, user_id: i32, class_id: i32) -> AppResult<GymClassModel> {
        let class = gym_class::Entity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        let already = ClassEnrollment::find()
            .filter(class_enrollment::Column::UserId.eq(user_id))
            .filter(class_enrollment::Column::ClassId.eq(class_id))
            .one(&self.db)
            .await?;

        if already.is_none() {
            let now = chrono::Utc::now().naive_utc();
            let enrollment = class_enrollment::ActiveModel {
                user_id: sea_orm::ActiveValue::Set(user_id),
                class_id: sea_orm::ActiveValue::Set(class_id),
                created_at: sea_orm::ActiveValue::Set(now),
                ..Default::default()
            };
            enrollment.insert(&self.db).await?;
        }

        Ok(class)
    }

    /// Classes the user is enrolled in.
    pub async fn enrolled_classes(&self, user_id: i32) -> AppResult<Vec<GymClassModel>> {
        let classes = gym_class::Entity::find()
            .join_rev(
                sea_orm::JoinType::InnerJoin,
                class_enrollment::Relation::GymClass.def(),
            )
            .filter(class_enrollment::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;
        Ok(classes)
    }
}
