//! 学校 / 院校实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub level: Option<String>,
    pub institution_type: String,
    pub wereda_id: Option<i64>,
    pub student_count: i32,
    pub teacher_count: i32,
    pub principal: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub established: Option<i32>,
    pub status: String,
    pub manager_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::weredas::Entity",
        from = "Column::WeredaId",
        to = "super::weredas::Column::Id"
    )]
    Wereda,
}

impl Related<super::weredas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wereda.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_school(self) -> crate::models::administration::School {
        use crate::models::administration::{InstitutionType, OrgStatus};

        crate::models::administration::School {
            id: self.id,
            name: self.name,
            code: self.code,
            level: self.level,
            institution_type: self
                .institution_type
                .parse::<InstitutionType>()
                .unwrap_or(InstitutionType::School),
            wereda_id: self.wereda_id,
            student_count: self.student_count,
            teacher_count: self.teacher_count,
            principal: self.principal,
            address: self.address,
            phone: self.phone,
            email: self.email,
            established: self.established,
            status: self.status.parse::<OrgStatus>().unwrap_or(OrgStatus::Active),
            manager_id: self.manager_id,
            supervisor_id: self.supervisor_id,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
