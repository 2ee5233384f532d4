//! 管理端的成绩与考勤维护

pub mod attendance;
pub mod grades;

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct RecordService {
    storage: Option<Arc<dyn Storage>>,
}

impl RecordService {
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

fn grade_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::GradeNotFound,
        "Grade not found",
    ))
}

fn attendance_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AttendanceNotFound,
        "Attendance record not found",
    ))
}
