use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use crate::models::common::{BatchError, PaginationInfo};
use crate::models::library::BorrowRecord;
use crate::models::records::{AttendanceRecord, AttendanceSummary, Grade};

// 学生列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}

// 创建学生响应，附带一次性明文密码
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentCreatedResponse {
    pub student: Student,
    pub username: String,
    pub password: String,
    pub student_id: String,
}

// 导入成功的账号
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct ImportedStudentAccount {
    pub username: String,
    pub password: String,
    pub student_id: String,
}

// CSV 导入响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentImportResponse {
    pub message: String,
    pub created: usize,
    pub users: Vec<ImportedStudentAccount>,
    pub errors: Vec<BatchError>,
}

// 学生本人成绩
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct MyGradesResponse {
    pub grades: Vec<Grade>,
    pub average_percentage: f64,
}

// 学生本人考勤
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct MyAttendanceResponse {
    pub records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}

// 学生本人借阅记录
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct MyLibraryResponse {
    pub records: Vec<BorrowRecord>,
    pub currently_borrowed: usize,
    pub overdue: usize,
}
