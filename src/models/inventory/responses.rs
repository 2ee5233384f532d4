use serde::Serialize;
use ts_rs::TS;

use super::entities::{Asset, StoreMaterial};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct MaterialListResponse {
    pub items: Vec<StoreMaterial>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct AssetListResponse {
    pub items: Vec<Asset>,
    pub pagination: PaginationInfo,
}

// 仓库汇总（某管理员名下）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/inventory.ts")]
pub struct StoreSummary {
    pub managed_by: i64,
    pub material_count: u64,
    pub total_available: i64,
    pub outstanding_issues: u64,
}
