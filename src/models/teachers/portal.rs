//! 教师自助门户的查询参数与响应结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::academics::DayOfWeek;
use crate::models::records::{AttendanceStatus, AttendanceSummary, GradeType};

// ---------- 课程与课表 ----------

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct SectionRef {
    pub id: i64,
    pub name: String,
    pub class_group: Option<String>,
}

// 我教授的课程及统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct MySubject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credit_hours: i32,
    pub department: String,
    pub level: String,
    pub total_students: usize,
    pub average_grade: f64,
    pub attendance_rate: f64,
    pub sections: Vec<SectionRef>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct ScheduleEntry {
    pub id: i64,
    pub subject: String,
    pub subject_code: String,
    pub section: String,
    pub room: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
}

// 按星期分组的课表
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct ScheduleDay {
    pub day_of_week: DayOfWeek,
    pub entries: Vec<ScheduleEntry>,
}

// 我负责或任课的班级
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct MyClass {
    pub id: i64,
    pub name: String,
    pub class_group: Option<String>,
    pub section: String,
    pub level: Option<String>,
    pub program: Option<String>,
    pub student_count: usize,
    pub is_advisor: bool,
    pub is_name_caller: bool,
    pub subjects_taught: Vec<String>,
}

// ---------- 考勤 / 成绩管理 ----------

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct AttendanceManagementParams {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub subject: Option<i64>,
    pub section: Option<i64>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct GradeManagementParams {
    pub semester: Option<i64>,
    pub subject: Option<i64>,
    pub section: Option<i64>,
    pub grade_type: Option<GradeType>,
    pub student: Option<i64>,
}

// ---------- 我的学生 ----------

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct MyStudentsParams {
    pub subject: Option<i64>,
    pub section: Option<i64>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct RecentGrade {
    pub subject: String,
    pub score: f64,
    pub full_mark: f64,
    pub percentage: f64,
    pub grade_type: GradeType,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct AcademicPerformance {
    pub average_grade: f64,
    pub total_assessments: usize,
    pub subjects_taught: Vec<String>,
    pub recent_grades: Vec<RecentGrade>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct MyStudent {
    pub student_id: i64,
    pub student_name: String,
    pub admission_no: Option<String>,
    pub student_id_number: Option<String>,
    pub class_section: Option<String>,
    pub email: Option<String>,
    pub academic_performance: AcademicPerformance,
    pub attendance_summary: AttendanceSummary,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct MyStudentsResponse {
    pub students: Vec<MyStudent>,
    pub total_students: usize,
}

// ---------- 仪表盘 ----------

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct TeacherInfo {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub academic_rank: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct DashboardStatistics {
    pub total_subjects: usize,
    pub total_students: usize,
    pub recent_grades_entered: usize,
    pub recent_attendance_taken: usize,
    pub pending_attendance: usize,
    pub avg_class_performance: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct TodaySlot {
    pub subject: String,
    pub section: String,
    pub room: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct DashboardSummary {
    pub teacher_info: TeacherInfo,
    pub statistics: DashboardStatistics,
    pub today_schedule: Vec<TodaySlot>,
}

// ---------- 报表 ----------

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub enum ReportType {
    Attendance,
    Grades,
    Performance,
    #[default]
    Summary,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct ReportParams {
    #[serde(rename = "type", default)]
    pub report_type: ReportType,
    pub subject: Option<i64>,
    pub section: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct StudentAttendanceRow {
    pub student: String,
    pub present_days: usize,
    pub absent_days: usize,
    pub total_days: usize,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct ReportGrade {
    pub subject: String,
    pub grade_type: GradeType,
    pub score: f64,
    pub full_mark: f64,
    pub percentage: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct StudentGradeRow {
    pub student: String,
    pub grades: Vec<ReportGrade>,
    pub average_percentage: f64,
    pub total_assessments: usize,
    pub highest_score: f64,
    pub lowest_score: f64,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct StudentPerformanceRow {
    pub student: String,
    pub average_grade: f64,
    pub attendance_rate: f64,
    pub total_assessments: usize,
    pub performance_status: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct RecentActivity {
    pub grades_this_month: usize,
    pub attendance_this_month: usize,
}

// 报表内容，按 report_type 区分
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "report_type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub enum TeacherReport {
    Attendance {
        data: Vec<StudentAttendanceRow>,
        total_students: usize,
        avg_attendance_rate: f64,
        students_below_75: usize,
    },
    Grades {
        data: Vec<StudentGradeRow>,
        total_students: usize,
        class_average: f64,
        students_below_60: usize,
        students_above_90: usize,
    },
    Performance {
        data: Vec<StudentPerformanceRow>,
        total_students: usize,
        excellent_performers: usize,
        at_risk_students: usize,
    },
    Summary {
        subjects_taught: usize,
        total_students: usize,
        total_grades_entered: usize,
        total_attendance_records: usize,
        recent_activity: RecentActivity,
    },
}

// ---------- 工具接口 ----------

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct AvailableSection {
    pub id: i64,
    pub name: String,
    pub class_group: Option<String>,
    pub level: Option<String>,
    pub program: Option<String>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_portal.ts")]
pub struct GradeTypeOption {
    pub value: GradeType,
    pub label: String,
}
