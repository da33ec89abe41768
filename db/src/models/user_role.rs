use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

/// Role assignment for a user. The `user_id` primary key enforces that an
/// identity holds at most one role on the platform.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_roles")]
pub struct Model {
    /// User ID (foreign key to `users`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    /// Role type: Student or Lecturer
    pub role: Role,
}

/// Enum representing the platform-wide user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role_type")]
pub enum Role {
    #[sea_orm(string_value = "student")]
    Student,

    #[sea_orm(string_value = "lecturer")]
    Lecturer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Lecturer => write!(f, "lecturer"),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Belongs to a user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assigns the given role to a user. A user carries at most one role.
    pub async fn assign(
        db: &DatabaseConnection,
        user_id: i64,
        role: Role,
    ) -> Result<Self, DbErr> {
        let row = ActiveModel {
            user_id: Set(user_id),
            role: Set(role),
        };
        row.insert(db).await
    }

    /// Returns the role held by a user, if any.
    pub async fn find_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Option<Role>, DbErr> {
        Ok(Entity::find_by_id(user_id).one(db).await?.map(|m| m.role))
    }

    /// Checks whether a user holds the given role.
    pub async fn has_role(
        db: &DatabaseConnection,
        user_id: i64,
        role: Role,
    ) -> Result<bool, DbErr> {
        Ok(Self::find_for_user(db, user_id).await? == Some(role))
    }
}
