use serde::Serialize;
use ts_rs::TS;

use super::entities::{School, Wereda};
use crate::models::common::PaginationInfo;
use crate::models::users::User;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct SchoolListResponse {
    pub items: Vec<School>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct WeredaListResponse {
    pub items: Vec<Wereda>,
}

// 管理账号注册结果，password 只返回这一次
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct RegistrationResponse {
    pub user: User,
    pub username: String,
    pub password: String,
    pub assigned_ids: Vec<i64>,
}
