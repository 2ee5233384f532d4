//! 教室实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub is_lab: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_room(self) -> crate::models::academics::Room {
        crate::models::academics::Room {
            id: self.id,
            name: self.name,
            building: self.building,
            capacity: self.capacity,
            is_lab: self.is_lab,
        }
    }
}
