use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::records::entities::define_str_enum;

define_str_enum! {
    /// 院校类型（学校 / 学院 / 大学共用一张表）
    InstitutionType, "../frontend/src/types/generated/administration.ts" {
        School => "school",
        College => "college",
        University => "university",
    }
}

define_str_enum! {
    /// 区 / 学校的启用状态
    OrgStatus, "../frontend/src/types/generated/administration.ts" {
        Active => "active",
        Inactive => "inactive",
    }
}

// 区（Wereda）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct Wereda {
    pub id: i64,
    pub name: String,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub number_of_schools: i32,
    pub number_of_students: i32,
    pub number_of_teachers: i32,
    pub literacy_rate: Option<f64>,
    pub status: OrgStatus,
    pub manager_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学校 / 院校
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct School {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub level: Option<String>,
    pub institution_type: InstitutionType,
    pub wereda_id: Option<i64>,
    pub student_count: i32,
    pub teacher_count: i32,
    pub principal: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub established: Option<i32>,
    pub status: OrgStatus,
    pub manager_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
