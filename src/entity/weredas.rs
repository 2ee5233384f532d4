//! 区（Wereda）实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weredas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub population: Option<i64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub area: Option<f64>,
    pub number_of_schools: i32,
    pub number_of_students: i32,
    pub number_of_teachers: i32,
    #[sea_orm(column_type = "Double", nullable)]
    pub literacy_rate: Option<f64>,
    pub status: String,
    pub manager_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schools::Entity")]
    Schools,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schools.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_wereda(self) -> crate::models::administration::Wereda {
        use crate::models::administration::OrgStatus;

        crate::models::administration::Wereda {
            id: self.id,
            name: self.name,
            population: self.population,
            area: self.area,
            number_of_schools: self.number_of_schools,
            number_of_students: self.number_of_students,
            number_of_teachers: self.number_of_teachers,
            literacy_rate: self.literacy_rate,
            status: self.status.parse::<OrgStatus>().unwrap_or(OrgStatus::Active),
            manager_id: self.manager_id,
            created_by: self.created_by,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
