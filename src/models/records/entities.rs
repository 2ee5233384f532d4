use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::utils::stats;

/// 定义字符串枚举的宏（snake_case 序列化 + as_str / Display / FromStr）
macro_rules! define_str_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $ts_file:literal { $($variant:ident => $value:literal),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export, export_to = $ts_file)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

pub(crate) use define_str_enum;

define_str_enum! {
    /// 成绩类型
    GradeType, "../frontend/src/types/generated/records.ts" {
        Assignment => "assignment",
        Quiz => "quiz",
        Midterm => "midterm",
        Final => "final",
        Project => "project",
    }
}

impl GradeType {
    pub fn label(&self) -> &'static str {
        match self {
            GradeType::Assignment => "Assignment",
            GradeType::Quiz => "Quiz",
            GradeType::Midterm => "Midterm Exam",
            GradeType::Final => "Final Exam",
            GradeType::Project => "Project",
        }
    }
}

define_str_enum! {
    /// 考勤状态
    AttendanceStatus, "../frontend/src/types/generated/records.ts" {
        Present => "present",
        Absent => "absent",
    }
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub subject_id: i64,
    pub subject_name: Option<String>,
    pub section_id: i64,
    pub teacher_id: Option<i64>,
    pub semester_id: i64,
    pub academic_year: String,
    pub grade_type: GradeType,
    pub score: f64,
    pub full_mark: f64,
    pub percentage: f64,
    pub letter: String,
    pub date_recorded: NaiveDate,
}

impl Grade {
    /// 由分数计算百分比与等级
    pub fn derive_scores(score: f64, full_mark: f64) -> (f64, String) {
        let percentage = stats::percentage(score, full_mark);
        (percentage, stats::letter_grade(percentage).to_string())
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: Option<String>,
    pub section_id: i64,
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub taken_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 考勤汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct AttendanceSummary {
    pub total_records: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub attendance_rate: f64,
}

impl AttendanceSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total_records += 1;
            match record.status {
                AttendanceStatus::Present => summary.present_count += 1,
                AttendanceStatus::Absent => summary.absent_count += 1,
            }
        }
        summary.attendance_rate = stats::rate(summary.present_count, summary.total_records);
        summary
    }
}

// A/B/C/D/F 分布
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/records.ts")]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: usize,
    #[serde(rename = "B")]
    pub b: usize,
    #[serde(rename = "C")]
    pub c: usize,
    #[serde(rename = "D")]
    pub d: usize,
    #[serde(rename = "F")]
    pub f: usize,
}

impl GradeDistribution {
    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut distribution = Self::default();
        for score in scores {
            match stats::letter_grade(score) {
                "A" => distribution.a += 1,
                "B" => distribution.b += 1,
                "C" => distribution.c += 1,
                "D" => distribution.d += 1,
                _ => distribution.f += 1,
            }
        }
        distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            student_id: 1,
            student_name: None,
            section_id: 1,
            subject_id: None,
            subject_name: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status,
            taken_by: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_attendance_summary() {
        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Absent),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.present_count, 2);
        assert_eq!(summary.absent_count, 1);
        assert_eq!(summary.attendance_rate, 66.7);

        assert_eq!(AttendanceSummary::from_records(&[]).attendance_rate, 0.0);
    }

    #[test]
    fn test_grade_distribution_boundaries() {
        let distribution = GradeDistribution::from_scores([90.0, 89.9, 80.0, 70.0, 60.0, 59.9]);
        assert_eq!(distribution.a, 1);
        assert_eq!(distribution.b, 2);
        assert_eq!(distribution.c, 1);
        assert_eq!(distribution.d, 1);
        assert_eq!(distribution.f, 1);
    }

    #[test]
    fn test_grade_type_strings() {
        assert_eq!("midterm".parse::<GradeType>().unwrap(), GradeType::Midterm);
        assert_eq!(GradeType::Final.label(), "Final Exam");
        assert!("homework".parse::<GradeType>().is_err());
    }
}
