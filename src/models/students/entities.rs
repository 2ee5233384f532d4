use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学籍状态缺省值
pub const DEFAULT_ACADEMIC_STATUS: &str = "Active";

// 学生档案（合并用户表的姓名、邮箱等字段）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub national_id: Option<String>,
    pub admission_no: String,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub year: Option<i32>,
    pub class_section: String,
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
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
