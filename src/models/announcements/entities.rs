use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::records::entities::define_str_enum;
use crate::models::users::UserRole;

define_str_enum! {
    /// 公告类型
    AnnouncementType, "../frontend/src/types/generated/announcement.ts" {
        General => "general",
        Exam => "exam",
        Fee => "fee",
        Event => "event",
        Health => "health",
        Academic => "academic",
    }
}

define_str_enum! {
    /// 公告优先级
    AnnouncementPriority, "../frontend/src/types/generated/announcement.ts" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

/// 面向所有人的受众标识
pub const AUDIENCE_ALL: &str = "all";

// 公告
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub priority: AnnouncementPriority,
    pub author_id: Option<i64>,
    pub target_audience: String,
    pub is_active: bool,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 某角色可见的受众标识：`all`、角色名、复数分组名
pub fn audiences_for(role: UserRole) -> Vec<String> {
    let mut audiences = vec![AUDIENCE_ALL.to_string(), role.as_str().to_string()];
    if let Some(group) = role.audience_group() {
        audiences.push(group.to_string());
    }
    audiences
}

/// 合法受众：`all`、任一角色名或 `students` / `teachers` / `staff`
pub fn is_valid_audience(audience: &str) -> bool {
    audience == AUDIENCE_ALL
        || matches!(audience, "students" | "teachers" | "staff")
        || audience.parse::<UserRole>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audiences_for_roles() {
        assert_eq!(audiences_for(UserRole::Student), vec!["all", "student", "students"]);
        assert_eq!(
            audiences_for(UserRole::Librarian),
            vec!["all", "librarian", "staff"]
        );
        assert_eq!(audiences_for(UserRole::Admin), vec!["all", "admin"]);
    }

    #[test]
    fn test_valid_audiences() {
        assert!(is_valid_audience("all"));
        assert!(is_valid_audience("teachers"));
        assert!(is_valid_audience("store_man"));
        assert!(!is_valid_audience("parents"));
    }
}
