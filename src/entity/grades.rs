//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub section_id: i64,
    pub teacher_id: Option<i64>,
    pub semester_id: i64,
    pub academic_year: String,
    pub grade_type: String,
    pub score: f64,
    pub full_mark: f64,
    pub date_recorded: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade(
        self,
        student_name: Option<String>,
        subject_name: Option<String>,
    ) -> crate::models::records::Grade {
        use crate::models::records::{Grade, GradeType};

        let (percentage, letter) = Grade::derive_scores(self.score, self.full_mark);
        Grade {
            id: self.id,
            student_id: self.student_id,
            student_name,
            subject_id: self.subject_id,
            subject_name,
            section_id: self.section_id,
            teacher_id: self.teacher_id,
            semester_id: self.semester_id,
            academic_year: self.academic_year,
            grade_type: self
                .grade_type
                .parse::<GradeType>()
                .unwrap_or(GradeType::Assignment),
            score: self.score,
            full_mark: self.full_mark,
            percentage,
            letter,
            date_recorded: self.date_recorded,
        }
    }
}
