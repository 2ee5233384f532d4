//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub admission_no: String,
    #[sea_orm(unique)]
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub class_section: String,
    pub academic_status: String,
    pub enrollment_date: Option<Date>,
    pub gender: Option<String>,
    pub dob: Option<Date>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub blood_group: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub medical_condition: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub extra_activities: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_relation: Option<String>,
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
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 合并账号信息，转换为学生业务模型
    pub fn into_student(self, user: super::users::Model) -> crate::models::students::Student {
        crate::models::students::Student {
            id: self.id,
            user_id: self.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            national_id: user.national_id,
            admission_no: self.admission_no,
            student_id: self.student_id,
            department: self.department,
            year: self.year,
            class_section: self.class_section,
            academic_status: self.academic_status,
            enrollment_date: self.enrollment_date,
            gender: self.gender,
            dob: self.dob,
            phone: self.phone,
            address: self.address,
            blood_group: self.blood_group,
            medical_condition: self.medical_condition,
            extra_activities: self.extra_activities,
            remarks: self.remarks,
            father_name: self.father_name,
            mother_name: self.mother_name,
            guardian_contact: self.guardian_contact,
            guardian_email: self.guardian_email,
            guardian_relation: self.guardian_relation,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
