use serde::Serialize;
use ts_rs::TS;

use super::entities::{AttendanceRecord, AttendanceSummary, Grade, GradeDistribution};
use crate::utils::stats;

// 成绩统计
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct GradeStatistics {
    pub total_grades: usize,
    pub average_score: f64,
    pub grade_distribution: GradeDistribution,
}

impl GradeStatistics {
    /// 基于百分比的平均分与等级分布
    pub fn from_grades(grades: &[Grade]) -> Self {
        Self {
            total_grades: grades.len(),
            average_score: stats::average(grades.iter().map(|g| g.percentage)),
            grade_distribution: GradeDistribution::from_scores(grades.iter().map(|g| g.percentage)),
        }
    }
}

// 成绩列表（含全量统计）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct GradeListResponse {
    pub grades: Vec<Grade>,
    pub statistics: GradeStatistics,
}

// 考勤列表（含全量汇总）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct AttendanceListResponse {
    pub attendance_records: Vec<AttendanceRecord>,
    pub summary: AttendanceSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::GradeType;
    use chrono::NaiveDate;

    fn grade(percentage: f64) -> Grade {
        Grade {
            id: 1,
            student_id: 1,
            student_name: None,
            subject_id: 1,
            subject_name: None,
            section_id: 1,
            teacher_id: Some(1),
            semester_id: 1,
            academic_year: "2025".to_string(),
            grade_type: GradeType::Quiz,
            score: percentage,
            full_mark: 100.0,
            percentage,
            letter: stats::letter_grade(percentage).to_string(),
            date_recorded: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        }
    }

    #[test]
    fn test_grade_statistics() {
        let statistics = GradeStatistics::from_grades(&[grade(95.0), grade(82.5), grade(40.0)]);
        assert_eq!(statistics.total_grades, 3);
        assert_eq!(statistics.average_score, 72.5);
        assert_eq!(statistics.grade_distribution.a, 1);
        assert_eq!(statistics.grade_distribution.b, 1);
        assert_eq!(statistics.grade_distribution.f, 1);

        let empty = GradeStatistics::from_grades(&[]);
        assert_eq!(empty.average_score, 0.0);
    }
}
