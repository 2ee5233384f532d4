use serde::Serialize;
use ts_rs::TS;

use super::entities::StaffMember;
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListResponse {
    pub items: Vec<StaffMember>,
    pub pagination: PaginationInfo,
}

// 创建职员响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffCreatedResponse {
    pub staff: StaffMember,
    pub username: String,
    pub password: String,
}
