//! 学生本人的档案、成绩、考勤与借阅

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    library::BorrowRecordListQuery,
    records::{AttendanceFilter, AttendanceSummary, GradeFilter},
    students::{MyAttendanceResponse, MyGradesResponse, MyLibraryResponse},
};
use crate::utils::stats;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub async fn my_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    match storage.get_student_by_user_id(user_id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student profile retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student profile not found",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}

// 成绩与考勤以账号 ID 关联学生
pub async fn my_grades(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    let filter = GradeFilter {
        student_id: Some(user_id),
        ..Default::default()
    };
    match storage.list_grades(filter).await {
        Ok(grades) => {
            let average_percentage = stats::average(grades.iter().map(|g| g.percentage));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MyGradesResponse {
                    grades,
                    average_percentage,
                },
                "Grades retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn my_attendance(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    let filter = AttendanceFilter {
        student_id: Some(user_id),
        ..Default::default()
    };
    match storage.list_attendance(filter).await {
        Ok(records) => {
            let summary = AttendanceSummary::from_records(&records);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MyAttendanceResponse { records, summary },
                "Attendance retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

pub async fn my_library(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request);

    let query = BorrowRecordListQuery {
        page: 1,
        size: AppConfig::get().accounts.list_record_limit,
        borrower_student_id: Some(user_id),
        ..Default::default()
    };
    match storage.list_borrow_records_with_pagination(query).await {
        Ok(page) => {
            let records = page.items;
            let currently_borrowed = records.iter().filter(|r| !r.returned).count();
            let overdue = records.iter().filter(|r| r.is_overdue).count();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MyLibraryResponse {
                    records,
                    currently_borrowed,
                    overdue,
                },
                "Library records retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}
