use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AssetStatus;
use crate::models::common::PaginationQuery;

// ---------- 仓库物资 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct CreateMaterialRequest {
    pub name: String,
    pub description: Option<String>,
    pub quantity_total: i32,
    pub quantity_available: Option<i32>,
    pub unit: Option<String>,
    pub managed_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct UpdateMaterialRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity_total: Option<i32>,
    pub quantity_available: Option<i32>,
    pub unit: Option<String>,
    pub managed_by: Option<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct MaterialListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub managed_by: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub managed_by: Option<i64>,
}

impl From<MaterialListParams> for MaterialListQuery {
    fn from(params: MaterialListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search,
            managed_by: params.managed_by,
        }
    }
}

// 领用物资
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct IssueMaterialRequest {
    pub material_id: i64,
    pub issued_to: i64,
    pub quantity: i32,
    pub issue_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
}

// 归还物资
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct ReturnMaterialRequest {
    pub actual_return_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct IssuedListParams {
    pub material_id: Option<i64>,
    pub issued_to: Option<i64>,
    pub returned: Option<bool>,
}

/// 写入存储层的领用记录
#[derive(Debug, Clone)]
pub struct NewIssue {
    pub material_id: i64,
    pub issued_to: i64,
    pub quantity: i32,
    pub issue_date: NaiveDate,
    pub expected_return_date: Option<NaiveDate>,
}

// ---------- 资产 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct CreateAssetCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct CreateAssetRequest {
    pub name: String,
    pub serial_number: String,
    pub category_id: Option<i64>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: Option<AssetStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct UpdateAssetRequest {
    pub name: Option<String>,
    pub serial_number: Option<String>,
    pub category_id: Option<i64>,
    pub assigned_to: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub status: Option<AssetStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct AssetListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AssetStatus>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AssetListQuery {
    pub page: u64,
    pub size: u64,
    pub status: Option<AssetStatus>,
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

impl From<AssetListParams> for AssetListQuery {
    fn from(params: AssetListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            status: params.status,
            category_id: params.category_id,
            search: params.search,
        }
    }
}

// 盘点
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct CreateAssetAuditRequest {
    pub audit_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status_at_audit: AssetStatus,
}

pub fn validate_quantities(total: i32, available: i32) -> Result<(), &'static str> {
    if total < 0 {
        return Err("quantity_total must not be negative");
    }
    if available < 0 || available > total {
        return Err("quantity_available must be between 0 and quantity_total");
    }
    Ok(())
}
