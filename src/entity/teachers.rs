//! 教师档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub employee_id: String,
    pub department: String,
    pub hire_date: Date,
    pub academic_rank: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::teacher_subjects::Entity")]
    TeacherSubjects,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::teacher_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeacherSubjects.def()
    }
}

// 经由 teacher_subjects 的多对多关系
impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_subjects::Relation::Subject.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::teacher_subjects::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(
        self,
        user: super::users::Model,
        subjects: Vec<super::subjects::Model>,
    ) -> crate::models::teachers::Teacher {
        crate::models::teachers::Teacher {
            id: self.id,
            user_id: self.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            national_id: user.national_id,
            employee_id: self.employee_id,
            department: self.department,
            hire_date: self.hire_date,
            academic_rank: self.academic_rank,
            subjects: subjects.into_iter().map(|s| s.into_subject()).collect(),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
