use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;

// 创建学生请求
//
// 日期字段接受 DD/MM/YYYY、MM/DD/YYYY、YYYY-MM-DD，无法解析时置空。
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub admission_no: String,
    pub class_section: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub academic_status: Option<String>,
    pub enrollment_date: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub medical_condition: Option<String>,
    pub extra_activities: Option<String>,
    pub remarks: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_relation: Option<String>,
}

// 更新学生请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub national_id: Option<String>,
    pub admission_no: Option<String>,
    pub class_section: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub academic_status: Option<String>,
    pub enrollment_date: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub medical_condition: Option<String>,
    pub extra_activities: Option<String>,
    pub remarks: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_relation: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub class_section: Option<String>,
    pub academic_status: Option<String>,
    pub department: Option<String>,
}

// 学生列表查询（存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub class_section: Option<String>,
    pub academic_status: Option<String>,
    pub department: Option<String>,
}

impl From<StudentListParams> for StudentListQuery {
    fn from(params: StudentListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search,
            class_section: params.class_section,
            academic_status: params.academic_status,
            department: params.department,
        }
    }
}

/// 学生档案字段变更（存储层）
///
/// `None` 表示不修改；日期字段外层 `Some(None)` 表示清空。
#[derive(Debug, Clone, Default)]
pub struct StudentProfileChanges {
    pub admission_no: Option<String>,
    pub student_id: Option<String>,
    pub class_section: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub academic_status: Option<String>,
    pub enrollment_date: Option<Option<NaiveDate>>,
    pub gender: Option<String>,
    pub dob: Option<Option<NaiveDate>>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub medical_condition: Option<String>,
    pub extra_activities: Option<String>,
    pub remarks: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_relation: Option<String>,
}

/// 写入存储层的学生档案
///
/// `student_id` 为空时由存储层在事务内生成下一个 `STUD` 编号。
#[derive(Debug, Clone, Default)]
pub struct NewStudentProfile {
    pub admission_no: String,
    pub student_id: Option<String>,
    pub class_section: String,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub academic_status: String,
    pub enrollment_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub medical_condition: Option<String>,
    pub extra_activities: Option<String>,
    pub remarks: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_relation: Option<String>,
}
