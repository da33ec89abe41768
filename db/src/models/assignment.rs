use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Represents an assignment under a course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    /// Primary key of the assignment.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the course this assignment belongs to.
    pub course_id: i64,
    /// Assignment title.
    pub title: String,
    /// Optional free-text description with requirements and guidelines.
    pub description: Option<String>,
    /// Due timestamp.
    pub due_date: DateTime<Utc>,
    /// Timestamp when the assignment was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the assignment was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning course.
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,

    /// Submissions handed in for this assignment.
    #[sea_orm(has_many = "super::submission::Entity")]
    Submissions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new assignment under a course.
    pub async fn create(
        db: &DatabaseConnection,
        course_id: i64,
        title: &str,
        description: Option<&str>,
        due_date: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let assignment = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.trim().to_owned()),
            description: Set(description.map(|d| d.to_owned())),
            due_date: Set(due_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        assignment.insert(db).await
    }

    /// Lists the assignments of a course, newest first.
    pub async fn list_for_course(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }
}
