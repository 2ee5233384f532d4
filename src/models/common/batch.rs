use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ApiResponse;
use crate::models::ErrorCode;

/// 单条或批量提交
///
/// 请求体既可以是一个对象，也可以是对象数组。
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub enum OneOrMany<T: TS> {
    Many(Vec<T>),
    One(T),
}

// 批量写入中单条失败的详情
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchError {
    pub index: usize,
    pub message: String,
}

// 批量写入结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/batch.ts")]
pub struct BatchResult<T: TS> {
    pub created: usize,
    pub errors: usize,
    pub records: Vec<T>,
    pub error_details: Vec<BatchError>,
}

impl<T: TS> BatchResult<T> {
    pub fn new() -> Self {
        Self {
            created: 0,
            errors: 0,
            records: Vec::new(),
            error_details: Vec::new(),
        }
    }

    pub fn push_ok(&mut self, record: T) {
        self.created += 1;
        self.records.push(record);
    }

    pub fn push_err(&mut self, index: usize, message: impl Into<String>) {
        self.errors += 1;
        self.error_details.push(BatchError {
            index,
            message: message.into(),
        });
    }
}

impl<T: TS + Serialize> BatchResult<T> {
    /// 至少写入一条返回 201，一条都没有写入返回 400，两种情况都带上明细
    pub fn into_response(self, message: &str) -> HttpResponse {
        if self.created > 0 {
            HttpResponse::Created().json(ApiResponse::success(self, message))
        } else {
            HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::ValidationFailed,
                self,
                "No records were created",
            ))
        }
    }
}

impl<T: TS> Default for BatchResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, TS)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_one_or_many_accepts_object_and_array() {
        let one: OneOrMany<Item> = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(matches!(one, OneOrMany::One(Item { id: 1 })));

        let many: OneOrMany<Item> = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert!(matches!(many, OneOrMany::Many(ref items) if items.len() == 2));
    }

    #[test]
    fn test_batch_status_depends_on_created_rows() {
        let mut failed: BatchResult<i64> = BatchResult::new();
        failed.push_err(0, "score must be between 0 and 100");
        failed.push_err(1, "score must be between 0 and 100");
        assert_eq!(
            failed.into_response("Grade batch processed").status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );

        let mut partial: BatchResult<i64> = BatchResult::new();
        partial.push_ok(7);
        partial.push_err(1, "duplicate");
        assert_eq!(
            partial.into_response("Grade batch processed").status(),
            actix_web::http::StatusCode::CREATED
        );
    }
}
