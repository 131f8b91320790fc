use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    /// Legacy numeric role flag carried alongside `role`: 1 means admin.
    /// Both encodings are live in stored data; use [`Model::is_admin`].
    pub role_base: i32,
    pub age: Option<i32>,
    pub fitness_goals: Option<String>,
    #[serde(skip_serializing)]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_password_expire: Option<DateTime>,
    pub membership_id: Option<i32>,
    pub membership_expiry: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::membership::Entity",
        from = "Column::MembershipId",
        to = "super::membership::Column::Id"
    )]
    Membership,
}

impl Related<super::membership::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Membership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Admin capability derived from both role encodings, computed once
    /// here instead of repeating the OR at each call site.
    pub fn is_admin(&self) -> bool {
        self.role == "admin" || self.role_base == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, role_base: i32) -> Model {
        let now = chrono::Utc::now().naive_utc();
        Model {
            id: 1,
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: role.to_string(),
            role_base,
            age: None,
            fitness_goals: None,
            reset_password_token: None,
            reset_password_expire: None,
            membership_id: None,
            membership_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn admin_role_passes() {
        assert!(user("admin", 0).is_admin());
    }

    #[test]
    fn role_base_fallback_passes() {
        assert!(user("user", 1).is_admin());
    }

    #[test]
    fn plain_user_rejected() {
        assert!(!user("user", 0).is_admin());
    }

    #[test]
    fn password_hash_never_serialized() {
        let json = serde_json::to_value(user("user", 0)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("reset_password_token").is_none());
        assert!(json.get("reset_password_expire").is_none());
    }
}
