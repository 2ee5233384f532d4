//! 教务基础数据：课程、学期、年级、教室、班级与课表
//!
//! 各资源的处理函数以 `impl AcademicsService` 的形式分布在同名子模块中。

pub mod class_groups;
pub mod rooms;
pub mod schedules;
pub mod sections;
pub mod semesters;
pub mod subjects;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AcademicsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }
}

fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message.into(),
    ))
}

fn deleted(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::<()>::success_empty(message))
}
