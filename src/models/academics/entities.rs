use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub credit_hours: i32,
    pub department: String,
    pub level: String,
}

// 学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Semester {
    pub id: i64,
    pub name: String,
    pub academic_year: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// 年级 / 班级组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct ClassGroup {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub academic_program: String,
}

// 教室
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub building: Option<String>,
    pub capacity: i32,
    pub is_lab: bool,
}

// 班级（ClassGroup 下的分班）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Section {
    pub id: i64,
    pub class_group_id: i64,
    pub class_group_name: Option<String>,
    pub name: String,
    pub advisor_id: Option<i64>,
    pub name_caller_id: Option<i64>,
}

impl Section {
    /// 展示名，如 "Grade 10 - Section A"
    pub fn display_name(&self) -> String {
        match &self.class_group_name {
            Some(group) => format!("{group} - Section {}", self.name),
            None => format!("Section {}", self.name),
        }
    }
}

// 星期
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn from_weekday(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monday" => Ok(DayOfWeek::Monday),
            "tuesday" => Ok(DayOfWeek::Tuesday),
            "wednesday" => Ok(DayOfWeek::Wednesday),
            "thursday" => Ok(DayOfWeek::Thursday),
            "friday" => Ok(DayOfWeek::Friday),
            "saturday" => Ok(DayOfWeek::Saturday),
            "sunday" => Ok(DayOfWeek::Sunday),
            _ => Err(format!("Invalid day of week: {s}")),
        }
    }
}

// 课表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Schedule {
    pub id: i64,
    pub section_id: i64,
    pub subject_id: i64,
    pub room_id: Option<i64>,
    pub teacher_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_of_week_parsing_is_case_insensitive() {
        assert_eq!("Monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("sunday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert!("funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_section_display_name() {
        let section = Section {
            id: 1,
            class_group_id: 2,
            class_group_name: Some("Grade 10".into()),
            name: "A".into(),
            advisor_id: None,
            name_caller_id: None,
        };
        assert_eq!(section.display_name(), "Grade 10 - Section A");
    }
}
