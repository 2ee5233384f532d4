use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::records::entities::define_str_enum;

define_str_enum! {
    /// 借阅人类型
    BorrowerType, "../frontend/src/types/generated/library.ts" {
        Teacher => "teacher",
        Student => "student",
    }
}

// 图书
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub library_branch: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 借阅记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BorrowRecord {
    pub id: i64,
    pub book_id: i64,
    pub book_title: Option<String>,
    pub borrower_type: BorrowerType,
    pub borrower_teacher_id: Option<i64>,
    pub borrower_student_id: Option<i64>,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub returned: bool,
    pub is_overdue: bool,
}

impl BorrowRecord {
    /// 未归还且已过应还日期
    pub fn overdue_on(returned: bool, expected_return_date: NaiveDate, today: NaiveDate) -> bool {
        !returned && expected_return_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overdue() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let before = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let after = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        assert!(!BorrowRecord::overdue_on(false, due, before));
        assert!(!BorrowRecord::overdue_on(false, due, due));
        assert!(BorrowRecord::overdue_on(false, due, after));
        assert!(!BorrowRecord::overdue_on(true, due, after));
    }
}
