use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Represents a user account in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique email address, used for sign-in.
    pub email: String,
    /// Display name shown to lecturers on submissions.
    pub full_name: String,
    /// Securely hashed password string.
    pub password_hash: String,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Courses,

    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Hashes a plaintext password with Argon2 and a fresh random salt.
    pub fn hash_password(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("Password hashing failed")
            .to_string()
    }

    /// Verifies a plaintext password against this user's stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Inserts a new user with a hashed password.
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            email: Set(email.to_lowercase()),
            full_name: Set(full_name.to_owned()),
            password_hash: Set(Self::hash_password(password)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        user.insert(db).await
    }

    /// Looks up a user by email address (case-insensitive).
    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.to_lowercase()))
            .one(db)
            .await
    }
}
