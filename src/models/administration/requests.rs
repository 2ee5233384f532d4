use serde::Deserialize;
use ts_rs::TS;

use super::entities::{InstitutionType, OrgStatus};
use crate::models::common::PaginationQuery;

// ---------- 区 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct CreateWeredaRequest {
    pub name: String,
    pub population: Option<i64>,
    pub area: Option<f64>,
    #[serde(default)]
    pub number_of_schools: i32,
    #[serde(default)]
    pub number_of_students: i32,
    #[serde(default)]
    pub number_of_teachers: i32,
    pub literacy_rate: Option<f64>,
    pub status: Option<OrgStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct UpdateWeredaRequest {
    pub name: Option<String>,
    pub population: Option<i64>,
    pub area: Option<f64>,
    pub number_of_schools: Option<i32>,
    pub number_of_students: Option<i32>,
    pub number_of_teachers: Option<i32>,
    pub literacy_rate: Option<f64>,
    pub status: Option<OrgStatus>,
    pub manager_id: Option<i64>,
}

// ---------- 学校 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct CreateSchoolRequest {
    pub name: String,
    pub code: String,
    pub level: Option<String>,
    pub institution_type: Option<InstitutionType>,
    pub wereda_id: Option<i64>,
    #[serde(default)]
    pub student_count: i32,
    #[serde(default)]
    pub teacher_count: i32,
    pub principal: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub established: Option<i32>,
    pub status: Option<OrgStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub level: Option<String>,
    pub institution_type: Option<InstitutionType>,
    pub wereda_id: Option<i64>,
    pub student_count: Option<i32>,
    pub teacher_count: Option<i32>,
    pub principal: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub established: Option<i32>,
    pub status: Option<OrgStatus>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct SchoolListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub institution_type: Option<InstitutionType>,
    pub status: Option<OrgStatus>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub wereda_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct SchoolListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub institution_type: Option<InstitutionType>,
    pub status: Option<OrgStatus>,
    pub wereda_id: Option<i64>,
}

impl From<SchoolListParams> for SchoolListQuery {
    fn from(params: SchoolListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search,
            institution_type: params.institution_type,
            status: params.status,
            wereda_id: params.wereda_id,
        }
    }
}

// ---------- 账号注册 ----------

// 区教育官员注册
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct RegisterWeredaOfficerRequest {
    pub wereda_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
}

// 校长 / 学校管理员注册
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct RegisterSchoolManagerRequest {
    pub school_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
}

// 督导注册，可分配多所学校
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/administration.ts")]
pub struct RegisterSupervisorRequest {
    pub school_ids: Vec<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
}
