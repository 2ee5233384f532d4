use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建教师请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub first_name: String,
    pub last_name: String,
    pub national_id: String,
    pub department: String,
    pub hire_date: NaiveDate,
    pub academic_rank: String,
    pub email: Option<String>,
    #[serde(default)]
    pub subjects: Vec<i64>,
}

// 更新教师请求；subjects 给出时整体替换
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub national_id: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub academic_rank: Option<String>,
    pub email: Option<String>,
    pub subjects: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub department: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: u64,
    pub size: u64,
    pub department: Option<String>,
    pub search: Option<String>,
}

impl From<TeacherListParams> for TeacherListQuery {
    fn from(params: TeacherListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            department: params.department,
            search: params.search,
        }
    }
}

/// 教师档案字段变更（存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherProfileChanges {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub academic_rank: Option<String>,
    pub subjects: Option<Vec<i64>>,
}

/// 写入存储层的教师档案，工号由存储层在事务内生成
#[derive(Debug, Clone)]
pub struct NewTeacherProfile {
    pub department: String,
    pub hire_date: NaiveDate,
    pub academic_rank: String,
    pub subjects: Vec<i64>,
}
