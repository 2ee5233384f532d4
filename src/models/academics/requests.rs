use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::DayOfWeek;
use crate::models::common::PaginationQuery;

// ---------- 课程 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
    pub credit_hours: i32,
    pub department: String,
    pub level: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub credit_hours: Option<i32>,
    pub department: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct SubjectListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub department: Option<String>,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub department: Option<String>,
    pub level: Option<String>,
}

impl From<SubjectListParams> for SubjectListQuery {
    fn from(params: SubjectListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search,
            department: params.department,
            level: params.level,
        }
    }
}

// ---------- 学期 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateSemesterRequest {
    pub name: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateSemesterRequest {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// ---------- 年级 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateClassGroupRequest {
    pub name: String,
    pub level: String,
    pub academic_program: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateClassGroupRequest {
    pub name: Option<String>,
    pub level: Option<String>,
    pub academic_program: Option<String>,
}

// ---------- 教室 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateRoomRequest {
    pub name: String,
    pub building: Option<String>,
    pub capacity: i32,
    #[serde(default)]
    pub is_lab: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateRoomRequest {
    pub name: Option<String>,
    pub building: Option<String>,
    pub capacity: Option<i32>,
    pub is_lab: Option<bool>,
}

// ---------- 班级 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateSectionRequest {
    pub class_group_id: i64,
    pub name: String,
    pub advisor_id: Option<i64>,
    pub name_caller_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateSectionRequest {
    pub class_group_id: Option<i64>,
    pub name: Option<String>,
    pub advisor_id: Option<i64>,
    pub name_caller_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct SectionListParams {
    pub class_group_id: Option<i64>,
}

// ---------- 课表 ----------

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CreateScheduleRequest {
    pub section_id: i64,
    pub subject_id: i64,
    pub room_id: Option<i64>,
    pub teacher_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct UpdateScheduleRequest {
    pub section_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub room_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<DayOfWeek>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct ScheduleListParams {
    pub section_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<DayOfWeek>,
}
