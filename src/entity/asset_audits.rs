//! 资产盘点记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asset_audits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub asset_id: i64,
    pub officer_id: Option<i64>,
    pub audit_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub status_at_audit: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id"
    )]
    Asset,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit(self) -> crate::models::inventory::AssetAudit {
        use crate::models::inventory::AssetStatus;

        crate::models::inventory::AssetAudit {
            id: self.id,
            asset_id: self.asset_id,
            officer_id: self.officer_id,
            audit_date: self.audit_date,
            notes: self.notes,
            status_at_audit: self
                .status_at_audit
                .parse::<AssetStatus>()
                .unwrap_or(AssetStatus::Working),
        }
    }
}
