use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::records::entities::define_str_enum;

define_str_enum! {
    /// 资产状态
    AssetStatus, "../frontend/src/types/generated/inventory.ts" {
        Working => "working",
        Damaged => "damaged",
        UnderRepair => "under_repair",
        Lost => "lost",
        Transferred => "transferred",
    }
}

// 仓库物资
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct StoreMaterial {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity_total: i32,
    pub quantity_available: i32,
    pub unit: String,
    pub managed_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 物资领用记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct IssuedMaterial {
    pub id: i64,
    pub material_id: i64,
    pub material_name: Option<String>,
    pub issued_to: i64,
    pub quantity: i32,
    pub issue_date: NaiveDate,
    pub expected_return_date: Option<NaiveDate>,
    pub actual_return_date: Option<NaiveDate>,
    pub returned: bool,
}

// 资产分类
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct AssetCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

// 固定资产
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub serial_number: String,
    pub category_id: Option<i64>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: AssetStatus,
    pub inventoried_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 资产盘点记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct AssetAudit {
    pub id: i64,
    pub asset_id: i64,
    pub officer_id: Option<i64>,
    pub audit_date: NaiveDate,
    pub notes: Option<String>,
    pub status_at_audit: AssetStatus,
}
