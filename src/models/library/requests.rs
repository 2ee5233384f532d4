use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::BorrowerType;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct CreateBookRequest {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
    pub total_copies: i32,
    /// 缺省等于 total_copies
    pub available_copies: Option<i32>,
    pub library_branch: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct UpdateBookRequest {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
    pub total_copies: Option<i32>,
    pub available_copies: Option<i32>,
    pub library_branch: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub library_branch: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_bool"
    )]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct BookListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub library_branch: Option<String>,
    pub available: Option<bool>,
}

impl From<BookListParams> for BookListQuery {
    fn from(params: BookListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: params.search,
            library_branch: params.library_branch,
            available: params.available,
        }
    }
}

// 借书请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BorrowBookRequest {
    pub book_id: i64,
    pub borrower_type: BorrowerType,
    /// 教师档案 ID（borrower_type = teacher）
    pub borrower_teacher_id: Option<i64>,
    /// 学生用户 ID（borrower_type = student）
    pub borrower_student_id: Option<i64>,
    pub borrow_date: Option<NaiveDate>,
    pub expected_return_date: NaiveDate,
}

// 还书请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct ReturnBookRequest {
    pub actual_return_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BorrowRecordListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_i64"
    )]
    pub book_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_bool"
    )]
    pub returned: Option<bool>,
    pub borrower_type: Option<BorrowerType>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_optional_bool"
    )]
    pub overdue: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct BorrowRecordListQuery {
    pub page: u64,
    pub size: u64,
    pub book_id: Option<i64>,
    pub returned: Option<bool>,
    pub borrower_type: Option<BorrowerType>,
    pub overdue: Option<bool>,
    pub borrower_student_id: Option<i64>,
}

impl From<BorrowRecordListParams> for BorrowRecordListQuery {
    fn from(params: BorrowRecordListParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            book_id: params.book_id,
            returned: params.returned,
            borrower_type: params.borrower_type,
            overdue: params.overdue,
            borrower_student_id: None,
        }
    }
}

/// 写入存储层的借阅记录
#[derive(Debug, Clone)]
pub struct NewBorrowRecord {
    pub book_id: i64,
    pub borrower_type: BorrowerType,
    pub borrower_teacher_id: Option<i64>,
    pub borrower_student_id: Option<i64>,
    pub borrow_date: NaiveDate,
    pub expected_return_date: NaiveDate,
}

/// 可借数量必须在 0 与总数之间
pub fn validate_copies(total: i32, available: i32) -> Result<(), &'static str> {
    if total < 0 {
        return Err("total_copies must not be negative");
    }
    if available < 0 || available > total {
        return Err("available_copies must be between 0 and total_copies");
    }
    Ok(())
}
