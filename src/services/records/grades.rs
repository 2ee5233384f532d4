use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RecordService, grade_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    records::{
        CreateGradeRequest, GradeFilter, GradeListResponse, GradeStatistics, UpdateGradeRequest,
        validate_score,
    },
};
use crate::utils::dates;

impl RecordService {
    pub async fn create_grade(
        &self,
        req: CreateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_score(req.score, req.full_mark) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        let teacher_id = req.teacher_id;

        match self
            .get_storage(request)
            .create_grade(req.into_new_grade(teacher_id, dates::today()))
            .await
        {
            Ok(grade) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(grade, "Grade recorded successfully"))),
            Err(e) => {
                tracing::warn!("Grade creation rejected: {}", e);
                Ok(e.to_response_with(ErrorCode::GradeAlreadyExists, ErrorCode::GradeNotFound))
            }
        }
    }

    /// 全部匹配的成绩及统计
    pub async fn list_grades(
        &self,
        filter: GradeFilter,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_grades(filter).await {
            Ok(grades) => {
                let statistics = GradeStatistics::from_grades(&grades);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    GradeListResponse { grades, statistics },
                    "Grades retrieved successfully",
                )))
            }
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_grade(id).await {
            Ok(Some(grade)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(grade, "Grade retrieved successfully"))),
            Ok(None) => Ok(grade_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_grade(
        &self,
        id: i64,
        req: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let existing = match storage.get_grade(id).await {
            Ok(Some(grade)) => grade,
            Ok(None) => return Ok(grade_not_found()),
            Err(e) => return Ok(e.to_response()),
        };
        let score = req.score.unwrap_or(existing.score);
        let full_mark = req.full_mark.unwrap_or(existing.full_mark);
        if let Err(msg) = validate_score(score, full_mark) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }

        match storage.update_grade(id, req).await {
            Ok(Some(grade)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(grade, "Grade updated successfully"))),
            Ok(None) => Ok(grade_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_grade(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_grade(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Grade deleted successfully"))),
            Ok(false) => Ok(grade_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }
}
