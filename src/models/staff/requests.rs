use serde::Deserialize;
use ts_rs::TS;

use super::entities::StaffStatus;
use crate::models::common::PaginationQuery;
use crate::models::users::UserRole;

// 创建职员请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct CreateStaffRequest {
    pub department: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub subject: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub qualifications: Option<String>,
    pub status: Option<StaffStatus>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
}

// 更新职员请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct UpdateStaffRequest {
    pub department: Option<String>,
    pub role: Option<UserRole>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub qualifications: Option<String>,
    pub status: Option<StaffStatus>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
}

// 职员列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/staff.ts")]
pub struct StaffListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
    pub status: Option<StaffStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StaffListQuery {
    pub page: u64,
    pub size: u64,
    pub department: Option<String>,
    pub status: Option<StaffStatus>,
    pub search: Option<String>,
}

impl From<StaffListParams> for StaffListQuery {
    fn from(params: StaffListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            department: params.department,
            status: params.status,
            search: params.search,
        }
    }
}

/// 职员档案字段变更（存储层）
#[derive(Debug, Clone, Default)]
pub struct StaffProfileChanges {
    pub staff_id: Option<String>,
    pub department: Option<String>,
    pub subject: Option<String>,
    pub hire_date: Option<Option<chrono::NaiveDate>>,
    pub salary: Option<f64>,
    pub qualifications: Option<String>,
    pub status: Option<StaffStatus>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
    pub phone: Option<String>,
}

/// 写入存储层的职员档案
///
/// `staff_id` 为空时由存储层在事务内生成下一个 `STF` 编号。
#[derive(Debug, Clone)]
pub struct NewStaffProfile {
    pub staff_id: Option<String>,
    pub department: String,
    pub subject: Option<String>,
    pub hire_date: Option<chrono::NaiveDate>,
    pub salary: Option<f64>,
    pub qualifications: Option<String>,
    pub status: StaffStatus,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub notes: Option<String>,
    pub phone: Option<String>,
}

impl NewStaffProfile {
    /// 行政账号注册时附带的最简档案
    pub fn for_department(department: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            staff_id: None,
            department: department.into(),
            subject: None,
            hire_date: None,
            salary: None,
            qualifications: None,
            status: StaffStatus::Active,
            address: None,
            emergency_contact: None,
            notes: None,
            phone,
        }
    }
}
