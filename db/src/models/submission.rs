use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

/// Represents a student's submission for an assignment.
///
/// `grade` and `feedback` stay empty until a lecturer reviews the submission.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Primary key of the submission.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the related assignment.
    pub assignment_id: i64,
    /// ID of the student who handed in the submission.
    pub student_id: i64,
    /// Free-text submission content.
    pub content: String,
    /// Optional name of an uploaded document kept alongside the content.
    pub file_name: Option<String>,
    /// Grade awarded by the lecturer, in [0, 100].
    pub grade: Option<f64>,
    /// Written feedback from the lecturer, at most 5000 characters.
    pub feedback: Option<String>,
    /// Timestamp when the submission was handed in.
    pub submitted_at: DateTime<Utc>,
    /// Timestamp when the submission was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Link to the related assignment.
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,

    /// Link to the student who handed in the submission.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new submission for an assignment.
    pub async fn create(
        db: &DatabaseConnection,
        assignment_id: i64,
        student_id: i64,
        content: &str,
        file_name: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let submission = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content.to_owned()),
            file_name: Set(file_name.map(|f| f.to_owned())),
            grade: Set(None),
            feedback: Set(None),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        submission.insert(db).await
    }

    /// Resolves the lecturer who owns the course this submission belongs to,
    /// walking submission -> assignment -> course.
    ///
    /// Returns `Ok(None)` when the submission (or its chain) does not exist,
    /// so callers can distinguish "not found" from "owned by someone else"
    /// without ever seeing the intermediate rows.
    pub async fn owning_lecturer(
        db: &DatabaseConnection,
        submission_id: i64,
    ) -> Result<Option<i64>, DbErr> {
        let Some(submission) = Entity::find_by_id(submission_id).one(db).await? else {
            return Ok(None);
        };

        let Some(assignment) = super::assignment::Entity::find_by_id(submission.assignment_id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };

        let course = super::course::Entity::find_by_id(assignment.course_id)
            .one(db)
            .await?;

        Ok(course.map(|c| c.lecturer_id))
    }

    /// Records a lecturer's review. Returns the updated submission, or
    /// `Ok(None)` when the submission does not exist.
    pub async fn set_review(
        db: &DatabaseConnection,
        submission_id: i64,
        grade: f64,
        feedback: Option<&str>,
    ) -> Result<Option<Self>, DbErr> {
        let Some(submission) = Entity::find_by_id(submission_id).one(db).await? else {
            return Ok(None);
        };

        let mut active = submission.into_active_model();
        active.grade = Set(Some(grade));
        active.feedback = Set(feedback.map(|f| f.to_owned()));
        active.updated_at = Set(Utc::now());
        active.update(db).await.map(Some)
    }

    /// Lists the submissions handed in for an assignment, newest first.
    pub async fn list_for_assignment(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }

    /// Lists the submissions for an assignment together with the students
    /// who handed them in, newest first.
    pub async fn list_for_assignment_with_students(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<Vec<(Self, Option<super::user::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .find_also_related(super::user::Entity)
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }

    /// Lists a student's submissions together with their assignments,
    /// newest first.
    pub async fn list_for_student_with_assignments(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<(Self, Option<super::assignment::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(super::assignment::Entity)
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }

    /// Lists everything a student has handed in, newest first.
    pub async fn list_for_student(
        db: &DatabaseConnection,
        student_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::SubmittedAt)
            .all(db)
            .await
    }
}
