//! 公告发布、按受众阅读与已读标记

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::{
        AnnouncementListParams, AnnouncementListQuery, AnnouncementPriority, AnnouncementType,
        AUDIENCE_ALL, CreateAnnouncementRequest, NewAnnouncement, UnreadCountResponse,
        UpdateAnnouncementRequest, audiences_for, is_valid_audience,
    },
    users::User,
};
use crate::storage::Storage;
use crate::utils::validate::require_non_blank;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

fn announcement_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AnnouncementNotFound,
        "Announcement not found",
    ))
}

fn invalid_audience(audience: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        format!("Invalid target audience: {audience}"),
    ))
}

impl AnnouncementService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_announcement(
        &self,
        req: CreateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(author_id) = RequireJWT::extract_user_id(request) else {
            return Ok(unauthorized());
        };
        if let Err(msg) = require_non_blank(&req.title, "title")
            .and_then(|_| require_non_blank(&req.content, "content"))
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
        let target_audience = req
            .target_audience
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| AUDIENCE_ALL.to_string());
        if !is_valid_audience(&target_audience) {
            return Ok(invalid_audience(&target_audience));
        }

        let announcement = NewAnnouncement {
            title: req.title.trim().to_string(),
            content: req.content,
            announcement_type: req.announcement_type.unwrap_or(AnnouncementType::General),
            priority: req.priority.unwrap_or(AnnouncementPriority::Medium),
            author_id,
            target_audience,
        };

        match self.get_storage(request).create_announcement(announcement).await {
            Ok(announcement) => {
                tracing::info!(
                    "Announcement {} published to '{}'",
                    announcement.id,
                    announcement.target_audience
                );
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    announcement,
                    "Announcement created successfully",
                )))
            }
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 当前用户可见的公告
    pub async fn list_announcements(
        &self,
        params: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(unauthorized());
        };
        self.list_for(&user, audiences_for(user.role), params, request)
            .await
    }

    /// 管理视图：全部公告，含已停用的
    pub async fn list_all_announcements(
        &self,
        params: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(unauthorized());
        };
        self.list_for(&user, Vec::new(), params, request).await
    }

    async fn list_for(
        &self,
        user: &User,
        audiences: Vec<String>,
        params: AnnouncementListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let (page, size) = params.pagination.normalized();
        let query = AnnouncementListQuery {
            page,
            size,
            audiences,
            announcement_type: params.announcement_type,
            priority: params.priority,
        };

        match self
            .get_storage(request)
            .list_announcements_with_pagination(query, user.id)
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Announcements retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 读者只能按 ID 访问自己受众范围内的启用公告
    pub async fn get_announcement(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(unauthorized());
        };
        self.find_for(id, user.id, audiences_for(user.role), request)
            .await
    }

    pub async fn get_managed_announcement(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(unauthorized());
        };
        self.find_for(id, user_id, Vec::new(), request).await
    }

    async fn find_for(
        &self,
        id: i64,
        reader_id: i64,
        audiences: Vec<String>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .get_announcement(id, reader_id, &audiences)
            .await
        {
            Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                announcement,
                "Announcement retrieved successfully",
            ))),
            Ok(None) => Ok(announcement_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_announcement(
        &self,
        id: i64,
        mut req: UpdateAnnouncementRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        req.target_audience = req.target_audience.map(|a| a.trim().to_lowercase());
        if let Some(ref audience) = req.target_audience
            && !is_valid_audience(audience)
        {
            return Ok(invalid_audience(audience));
        }

        match self.get_storage(request).update_announcement(id, req).await {
            Ok(Some(announcement)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                announcement,
                "Announcement updated successfully",
            ))),
            Ok(None) => Ok(announcement_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_announcement(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_announcement(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Announcement deleted successfully",
            ))),
            Ok(false) => Ok(announcement_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 重复标记不报错
    pub async fn mark_read(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(unauthorized());
        };

        match self
            .get_storage(request)
            .mark_announcement_read(id, user.id, &audiences_for(user.role))
            .await
        {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Announcement marked as read",
            ))),
            Ok(false) => Ok(announcement_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user_claims(request) else {
            return Ok(unauthorized());
        };

        match self
            .get_storage(request)
            .count_unread_announcements(user.id, &audiences_for(user.role))
            .await
        {
            Ok(unread_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                UnreadCountResponse { unread_count },
                "Unread count retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }
}
