use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateRoomRequest, UpdateRoomRequest},
};
use crate::utils::validate::require_non_blank;

impl AcademicsService {
    pub async fn create_room(
        &self,
        req: CreateRoomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }
        if req.capacity < 0 {
            return Ok(bad_request("capacity must not be negative"));
        }

        match self.get_storage(request).create_room(req).await {
            Ok(room) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(room, "Room created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_rooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_rooms().await {
            Ok(rooms) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(rooms, "Rooms retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_room(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_room(id).await {
            Ok(Some(room)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(room, "Room retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::RoomNotFound, "Room not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_room(
        &self,
        id: i64,
        req: UpdateRoomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if matches!(req.capacity, Some(capacity) if capacity < 0) {
            return Ok(bad_request("capacity must not be negative"));
        }

        match self.get_storage(request).update_room(id, req).await {
            Ok(Some(room)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(room, "Room updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::RoomNotFound, "Room not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_room(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_room(id).await {
            Ok(true) => Ok(deleted("Room deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::RoomNotFound, "Room not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}
