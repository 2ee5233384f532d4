use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{current_teacher, record_limit};
use crate::models::{
    ApiResponse, ErrorCode,
    common::{BatchResult, OneOrMany},
    records::{
        AttendanceFilter, AttendanceListResponse, AttendanceSummary, CreateAttendanceRequest,
    },
    teachers::portal::AttendanceManagementParams,
};
use crate::services::teachers::TeacherService;
use crate::utils::dates;

/// 本人记录的考勤；汇总覆盖全部匹配记录，列表截断到上限
pub async fn list_attendance(
    service: &TeacherService,
    params: AttendanceManagementParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };

    let filter = AttendanceFilter {
        taken_by: Some(ctx.teacher.id),
        subject_id: params.subject,
        section_id: params.section,
        status: params.status,
        date_from: params.date_from,
        date_to: params.date_to,
        ..Default::default()
    };

    match ctx.storage.list_attendance(filter).await {
        Ok(mut records) => {
            let summary = AttendanceSummary::from_records(&records);
            records.truncate(record_limit());
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AttendanceListResponse {
                    attendance_records: records,
                    summary,
                },
                "Attendance records retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

/// 单条或批量点名，记录人为当前教师，日期缺省为今天
pub async fn mark_attendance(
    service: &TeacherService,
    body: OneOrMany<CreateAttendanceRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let today = dates::today();
    let taken_by = Some(ctx.teacher.id);

    match body {
        OneOrMany::One(req) => {
            match ctx
                .storage
                .create_attendance(req.into_new_attendance(taken_by, today))
                .await
            {
                Ok(record) => Ok(HttpResponse::Created()
                    .json(ApiResponse::success(record, "Attendance marked successfully"))),
                Err(e) => Ok(e.to_response_with(
                    ErrorCode::AttendanceAlreadyExists,
                    ErrorCode::AttendanceNotFound,
                )),
            }
        }
        OneOrMany::Many(items) => {
            let mut result = BatchResult::new();
            for (index, req) in items.into_iter().enumerate() {
                match ctx
                    .storage
                    .create_attendance(req.into_new_attendance(taken_by, today))
                    .await
                {
                    Ok(record) => result.push_ok(record),
                    Err(e) => result.push_err(index, e.message()),
                }
            }
            tracing::info!(
                "Teacher {} marked attendance: {} created, {} failed",
                ctx.teacher.employee_id,
                result.created,
                result.errors
            );
            Ok(result.into_response("Attendance batch processed"))
        }
    }
}
