use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveTime;

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest},
};

pub(super) fn validate_times(start: NaiveTime, end: NaiveTime) -> Result<(), &'static str> {
    if start >= end {
        return Err("start_time must be before end_time");
    }
    Ok(())
}

impl AcademicsService {
    /// 同一班级同一时段只能有一节课，冲突由唯一索引返回 409
    pub async fn create_schedule(
        &self,
        req: CreateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_times(req.start_time, req.end_time) {
            return Ok(bad_request(msg));
        }

        match self.get_storage(request).create_schedule(req).await {
            Ok(schedule) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(schedule, "Schedule created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_schedules(
        &self,
        params: ScheduleListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_schedules(params).await {
            Ok(schedules) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(schedules, "Schedules retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_schedule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_schedule(id).await {
            Ok(Some(schedule)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(schedule, "Schedule retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        if req.start_time.is_some() || req.end_time.is_some() {
            let existing = match storage.get_schedule(id).await {
                Ok(Some(schedule)) => schedule,
                Ok(None) => return Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
                Err(e) => return Ok(e.to_response()),
            };
            let start = req.start_time.unwrap_or(existing.start_time);
            let end = req.end_time.unwrap_or(existing.end_time);
            if let Err(msg) = validate_times(start, end) {
                return Ok(bad_request(msg));
            }
        }

        match storage.update_schedule(id, req).await {
            Ok(Some(schedule)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(schedule, "Schedule updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_schedule(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_schedule(id).await {
            Ok(true) => Ok(deleted("Schedule deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::ScheduleNotFound, "Schedule not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_times_must_be_ordered() {
        let eight = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert!(validate_times(eight, nine).is_ok());
        assert_eq!(
            validate_times(nine, eight).unwrap_err(),
            "start_time must be before end_time"
        );
    }
}
