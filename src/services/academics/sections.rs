use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateSectionRequest, SectionListParams, UpdateSectionRequest},
};
use crate::utils::validate::require_non_blank;

impl AcademicsService {
    pub async fn create_section(
        &self,
        req: CreateSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }
        let storage = self.get_storage(request);

        match storage.get_class_group(req.class_group_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(not_found(ErrorCode::ClassGroupNotFound, "Class group not found"));
            }
            Err(e) => return Ok(e.to_response()),
        }

        match storage.create_section(req).await {
            Ok(section) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(section, "Section created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_sections(
        &self,
        params: SectionListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_sections(params.class_group_id)
            .await
        {
            Ok(sections) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(sections, "Sections retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_section(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_section(id).await {
            Ok(Some(section)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(section, "Section retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SectionNotFound, "Section not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_section(
        &self,
        id: i64,
        req: UpdateSectionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        if let Some(group_id) = req.class_group_id {
            match storage.get_class_group(group_id).await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(not_found(ErrorCode::ClassGroupNotFound, "Class group not found"));
                }
                Err(e) => return Ok(e.to_response()),
            }
        }

        match storage.update_section(id, req).await {
            Ok(Some(section)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(section, "Section updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SectionNotFound, "Section not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_section(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_section(id).await {
            Ok(true) => Ok(deleted("Section deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::SectionNotFound, "Section not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}
