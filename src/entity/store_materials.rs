//! 仓库物资实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "store_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub quantity_total: i32,
    pub quantity_available: i32,
    pub unit: String,
    pub managed_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::issued_materials::Entity")]
    IssuedMaterials,
}

impl Related<super::issued_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IssuedMaterials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_material(self) -> crate::models::inventory::StoreMaterial {
        crate::models::inventory::StoreMaterial {
            id: self.id,
            name: self.name,
            description: self.description,
            quantity_total: self.quantity_total,
            quantity_available: self.quantity_available,
            unit: self.unit,
            managed_by: self.managed_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
