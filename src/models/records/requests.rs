use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AttendanceStatus, GradeType};

fn default_full_mark() -> f64 {
    100.0
}

// 录入成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub section_id: i64,
    pub semester_id: i64,
    pub academic_year: String,
    pub grade_type: GradeType,
    pub score: f64,
    #[serde(default = "default_full_mark")]
    pub full_mark: f64,
    pub date_recorded: Option<NaiveDate>,
    /// 管理端录入时可指定教师；教师自助录入时忽略
    pub teacher_id: Option<i64>,
}

// 修改成绩
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct UpdateGradeRequest {
    pub id: Option<i64>,
    pub score: Option<f64>,
    pub full_mark: Option<f64>,
    pub grade_type: Option<GradeType>,
    pub academic_year: Option<String>,
    pub date_recorded: Option<NaiveDate>,
}

// 记录考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct CreateAttendanceRequest {
    pub student_id: i64,
    pub section_id: i64,
    pub subject_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub status: AttendanceStatus,
    pub taken_by: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub date: Option<NaiveDate>,
}

// 成绩筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct GradeFilter {
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub section_id: Option<i64>,
    pub semester_id: Option<i64>,
    pub grade_type: Option<GradeType>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

// 考勤筛选条件
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct AttendanceFilter {
    pub taken_by: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub section_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// 写入存储层的成绩
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: i64,
    pub subject_id: i64,
    pub section_id: i64,
    pub teacher_id: Option<i64>,
    pub semester_id: i64,
    pub academic_year: String,
    pub grade_type: GradeType,
    pub score: f64,
    pub full_mark: f64,
    pub date_recorded: NaiveDate,
}

/// 写入存储层的考勤
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub section_id: i64,
    pub subject_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub taken_by: Option<i64>,
}

/// 满分必须大于 0，分数在 0 与满分之间
pub fn validate_score(score: f64, full_mark: f64) -> Result<(), String> {
    if !full_mark.is_finite() || full_mark <= 0.0 {
        return Err("full_mark must be greater than 0".to_string());
    }
    if !score.is_finite() || score < 0.0 || score > full_mark {
        return Err(format!("score must be between 0 and {full_mark}"));
    }
    Ok(())
}

impl CreateGradeRequest {
    /// `teacher_id` 由调用方决定：教师端强制为本人，管理端取请求值
    pub fn into_new_grade(self, teacher_id: Option<i64>, today: NaiveDate) -> NewGrade {
        NewGrade {
            student_id: self.student_id,
            subject_id: self.subject_id,
            section_id: self.section_id,
            teacher_id,
            semester_id: self.semester_id,
            academic_year: self.academic_year.trim().to_string(),
            grade_type: self.grade_type,
            score: self.score,
            full_mark: self.full_mark,
            date_recorded: self.date_recorded.unwrap_or(today),
        }
    }
}

impl CreateAttendanceRequest {
    pub fn into_new_attendance(self, taken_by: Option<i64>, today: NaiveDate) -> NewAttendance {
        NewAttendance {
            student_id: self.student_id,
            section_id: self.section_id,
            subject_id: self.subject_id,
            date: self.date.unwrap_or(today),
            status: self.status,
            taken_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(validate_score(0.0, 100.0).is_ok());
        assert!(validate_score(20.0, 20.0).is_ok());
        assert!(validate_score(20.5, 20.0).is_err());
        assert!(validate_score(-1.0, 100.0).is_err());
        assert_eq!(
            validate_score(5.0, 0.0).unwrap_err(),
            "full_mark must be greater than 0"
        );
    }

    #[test]
    fn test_full_mark_defaults_to_100() {
        let req: CreateGradeRequest = serde_json::from_str(
            r#"{"student_id":1,"subject_id":2,"section_id":3,"semester_id":4,
                "academic_year":"2024/25","grade_type":"quiz","score":8}"#,
        )
        .unwrap();
        assert_eq!(req.full_mark, 100.0);
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let grade = req.into_new_grade(Some(9), today);
        assert_eq!(grade.teacher_id, Some(9));
        assert_eq!(grade.date_recorded, today);
    }
}
