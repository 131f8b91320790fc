use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "trainers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub photo: String,
    pub specialty: String,
    pub bio: String,
    /// Years of experience.
    pub experience: i32,
    /// Weekly slots as a JSON array of {day, startTime, endTime, classId}.
    pub schedule: Json,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gym_class::Entity")]
    GymClass,
}

impl Related<super::gym_class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymClass.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
