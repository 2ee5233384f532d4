use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{current_teacher, record_limit};
use crate::models::{
    ApiResponse, ErrorCode,
    common::{BatchResult, OneOrMany},
    records::{
        CreateGradeRequest, GradeFilter, GradeListResponse, GradeStatistics,
        UpdateGradeRequest, validate_score,
    },
    teachers::portal::GradeManagementParams,
};
use crate::services::teachers::TeacherService;
use crate::utils::dates;

pub async fn list_grades(
    service: &TeacherService,
    params: GradeManagementParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    let filter = GradeFilter {
        teacher_id: Some(ctx.teacher.id),
        student_id: params.student,
        subject_id: params.subject,
        section_id: params.section,
        semester_id: params.semester,
        grade_type: params.grade_type,
        ..Default::default()
    };

    match ctx.storage.list_grades(filter).await {
        Ok(mut grades) => {
            let statistics = GradeStatistics::from_grades(&grades);
            grades.truncate(record_limit());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GradeListResponse { grades, statistics },
                "Grades retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

/// 单条或批量录入成绩，录入人为当前教师
pub async fn enter_grades(
    service: &TeacherService,
    body: OneOrMany<CreateGradeRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let today = dates::today();
    let teacher_id = Some(ctx.teacher.id);

    match body {
        OneOrMany::One(req) => {
            if let Err(msg) = validate_score(req.score, req.full_mark) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
            }
            match ctx
                .storage
                .create_grade(req.into_new_grade(teacher_id, today))
                .await
            {
                Ok(grade) => Ok(HttpResponse::Created()
                    .json(ApiResponse::success(grade, "Grade recorded successfully"))),
                Err(e) => Ok(e.to_response_with(
                    ErrorCode::GradeAlreadyExists,
                    ErrorCode::GradeNotFound,
                )),
            }
        }
        OneOrMany::Many(items) => {
            let mut result = BatchResult::new();
            for (index, req) in items.into_iter().enumerate() {
                if let Err(msg) = validate_score(req.score, req.full_mark) {
                    result.push_err(index, msg);
                    continue;
                }
                match ctx
                    .storage
                    .create_grade(req.into_new_grade(teacher_id, today))
                    .await
                {
                    Ok(grade) => result.push_ok(grade),
                    Err(e) => result.push_err(index, e.message()),
                }
            }
            tracing::info!(
                "Teacher {} entered grades: {} created, {} failed",
                ctx.teacher.employee_id,
                result.created,
                result.errors
            );
            Ok(result.into_response("Grade batch processed"))
        }
    }
}

/// 修改本人录入的成绩；他人的成绩视为不存在
pub async fn update_grade(
    service: &TeacherService,
    id: Option<i64>,
    req: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(grade_id) = id.or(req.id) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ValidationFailed,
            "Grade id is required",
        )));
    };
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    let existing = match ctx.storage.get_grade(grade_id).await {
        Ok(Some(grade)) if grade.teacher_id == Some(ctx.teacher.id) => grade,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "Grade not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    let score = req.score.unwrap_or(existing.score);
    let full_mark = req.full_mark.unwrap_or(existing.full_mark);
    if let Err(msg) = validate_score(score, full_mark) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    match ctx.storage.update_grade(grade_id, req).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(grade, "Grade updated successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
