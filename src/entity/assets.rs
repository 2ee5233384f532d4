//! 固定资产实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub serial_number: String,
    pub category_id: Option<i64>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<Date>,
    pub status: String,
    pub inventoried_by: Option<i64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset_categories::Entity",
        from = "Column::CategoryId",
        to = "super::asset_categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::asset_audits::Entity")]
    Audits,
}

impl Related<super::asset_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::asset_audits::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Audits.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_asset(self) -> crate::models::inventory::Asset {
        use crate::models::inventory::AssetStatus;

        crate::models::inventory::Asset {
            id: self.id,
            name: self.name,
            serial_number: self.serial_number,
            category_id: self.category_id,
            assigned_to: self.assigned_to,
            location: self.location,
            purchase_date: self.purchase_date,
            status: self
                .status
                .parse::<AssetStatus>()
                .unwrap_or(AssetStatus::Working),
            inventoried_by: self.inventoried_by,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
