use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Represents a course in the `courses` table. A course is owned by exactly
/// one lecturer; that ownership is the root of every authorization decision
/// on assignments and submissions below it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    /// Primary key of the course.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the lecturer who owns this course.
    pub lecturer_id: i64,
    /// Unique course code, stored uppercase (e.g. "CS101").
    pub code: String,
    /// Course title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Timestamp when the course was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the course was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning lecturer.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LecturerId",
        to = "super::user::Column::Id"
    )]
    Lecturer,

    /// Assignments under this course.
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new course owned by the given lecturer. The code is
    /// normalized to uppercase before storage.
    pub async fn create(
        db: &DatabaseConnection,
        lecturer_id: i64,
        code: &str,
        title: &str,
        description: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            lecturer_id: Set(lecturer_id),
            code: Set(code.trim().to_uppercase()),
            title: Set(title.trim().to_owned()),
            description: Set(description.map(|d| d.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        course.insert(db).await
    }

    /// Looks up a course by its (uppercase) code.
    pub async fn find_by_code(
        db: &DatabaseConnection,
        code: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Code.eq(code.trim().to_uppercase()))
            .one(db)
            .await
    }

    /// Lists the courses owned by a lecturer, newest first.
    pub async fn list_for_lecturer(
        db: &DatabaseConnection,
        lecturer_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::LecturerId.eq(lecturer_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Lists every course on the platform, newest first.
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}
