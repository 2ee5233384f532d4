//! 职员档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_id: i64,
    #[sea_orm(unique)]
    pub staff_id: Option<String>,
    pub department: String,
    pub subject: Option<String>,
    pub hire_date: Option<Date>,
    #[sea_orm(column_type = "Double", nullable)]
    pub salary: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub phone: Option<String>,
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
    pub fn into_staff(self, user: super::users::Model) -> crate::models::staff::StaffMember {
        use crate::models::staff::StaffStatus;
        use crate::models::users::UserRole;

        crate::models::staff::StaffMember {
            id: self.id,
            user_id: self.user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.parse::<UserRole>().unwrap_or(UserRole::Teacher),
            staff_id: self.staff_id,
            department: self.department,
            subject: self.subject,
            hire_date: self.hire_date,
            salary: self.salary,
            qualifications: self.qualifications,
            status: self
                .status
                .parse::<StaffStatus>()
                .unwrap_or(StaffStatus::Active),
            address: self.address,
            emergency_contact: self.emergency_contact,
            notes: self.notes,
            phone: self.phone,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
