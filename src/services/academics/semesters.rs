use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateSemesterRequest, UpdateSemesterRequest},
};
use crate::utils::validate::require_non_blank;

/// 学期开始日期必须早于结束日期
pub(super) fn validate_dates(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start >= end {
        return Err("start_date must be before end_date");
    }
    Ok(())
}

impl AcademicsService {
    pub async fn create_semester(
        &self,
        req: CreateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }
        if let Err(msg) = validate_dates(req.start_date, req.end_date) {
            return Ok(bad_request(msg));
        }

        match self.get_storage(request).create_semester(req).await {
            Ok(semester) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(semester, "Semester created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_semesters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_semesters().await {
            Ok(semesters) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(semesters, "Semesters retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_semester(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_semester(id).await {
            Ok(Some(semester)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(semester, "Semester retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SemesterNotFound, "Semester not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 只改一端日期时与现有另一端一起校验
    pub async fn update_semester(
        &self,
        id: i64,
        req: UpdateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        if req.start_date.is_some() || req.end_date.is_some() {
            let existing = match storage.get_semester(id).await {
                Ok(Some(semester)) => semester,
                Ok(None) => return Ok(not_found(ErrorCode::SemesterNotFound, "Semester not found")),
                Err(e) => return Ok(e.to_response()),
            };
            let start = req.start_date.unwrap_or(existing.start_date);
            let end = req.end_date.unwrap_or(existing.end_date);
            if let Err(msg) = validate_dates(start, end) {
                return Ok(bad_request(msg));
            }
        }

        match storage.update_semester(id, req).await {
            Ok(Some(semester)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(semester, "Semester updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SemesterNotFound, "Semester not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_semester(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_semester(id).await {
            Ok(true) => Ok(deleted("Semester deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::SemesterNotFound, "Semester not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_dates_must_be_ordered() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert!(validate_dates(start, end).is_ok());
        assert!(validate_dates(end, start).is_err());
        assert!(validate_dates(start, start).is_err());
    }
}
