use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RecordService, attendance_not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    records::{
        AttendanceFilter, AttendanceListResponse, AttendanceSummary, CreateAttendanceRequest,
        UpdateAttendanceRequest,
    },
};
use crate::utils::dates;

impl RecordService {
    pub async fn create_attendance(
        &self,
        req: CreateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let taken_by = req.taken_by;

        match self
            .get_storage(request)
            .create_attendance(req.into_new_attendance(taken_by, dates::today()))
            .await
        {
            Ok(record) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(record, "Attendance recorded successfully"))),
            Err(e) => {
                tracing::warn!("Attendance creation rejected: {}", e);
                Ok(e.to_response_with(
                    ErrorCode::AttendanceAlreadyExists,
                    ErrorCode::AttendanceNotFound,
                ))
            }
        }
    }

    pub async fn list_attendance(
        &self,
        filter: AttendanceFilter,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_attendance(filter).await {
            Ok(records) => {
                let summary = AttendanceSummary::from_records(&records);
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

    pub async fn get_attendance(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_attendance(id).await {
            Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance record retrieved successfully",
            ))),
            Ok(None) => Ok(attendance_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).update_attendance(id, req).await {
            Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Attendance record updated successfully",
            ))),
            Ok(None) => Ok(attendance_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_attendance(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Attendance record deleted successfully",
            ))),
            Ok(false) => Ok(attendance_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }
}
