//! 物资领用记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "issued_materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub material_id: i64,
    pub issued_to: i64,
    pub quantity: i32,
    pub issue_date: Date,
    pub expected_return_date: Option<Date>,
    pub actual_return_date: Option<Date>,
    pub returned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::store_materials::Entity",
        from = "Column::MaterialId",
        to = "super::store_materials::Column::Id"
    )]
    Material,
}

impl Related<super::store_materials::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_issued(self, material_name: Option<String>) -> crate::models::inventory::IssuedMaterial {
        crate::models::inventory::IssuedMaterial {
            id: self.id,
            material_id: self.material_id,
            material_name,
            issued_to: self.issued_to,
            quantity: self.quantity,
            issue_date: self.issue_date,
            expected_return_date: self.expected_return_date,
            actual_return_date: self.actual_return_date,
            returned: self.returned,
        }
    }
}
