use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateClassGroupRequest, UpdateClassGroupRequest},
};
use crate::utils::validate::require_non_blank;

impl AcademicsService {
    pub async fn create_class_group(
        &self,
        req: CreateClassGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }

        match self.get_storage(request).create_class_group(req).await {
            Ok(group) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(group, "Class group created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_class_groups(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_class_groups().await {
            Ok(groups) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(groups, "Class groups retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_class_group(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_class_group(id).await {
            Ok(Some(group)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(group, "Class group retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::ClassGroupNotFound, "Class group not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_class_group(
        &self,
        id: i64,
        req: UpdateClassGroupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).update_class_group(id, req).await {
            Ok(Some(group)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(group, "Class group updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::ClassGroupNotFound, "Class group not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_class_group(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_class_group(id).await {
            Ok(true) => Ok(deleted("Class group deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::ClassGroupNotFound, "Class group not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}
