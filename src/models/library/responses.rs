use serde::Serialize;
use ts_rs::TS;

use super::entities::{Book, BorrowRecord};
use crate::models::common::PaginationInfo;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BookListResponse {
    pub items: Vec<Book>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/library.ts")]
pub struct BorrowRecordListResponse {
    pub items: Vec<BorrowRecord>,
    pub pagination: PaginationInfo,
}
