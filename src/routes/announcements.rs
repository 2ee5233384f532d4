use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AnnouncementService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AnnouncementService 实例
static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    query: web::Query<AnnouncementListParams>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .list_announcements(query.into_inner(), &req)
        .await
}

pub async fn get_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.get_announcement(id.0, &req).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.mark_read(id.0, &req).await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.unread_count(&req).await
}

// ---------- 管理 ----------

pub async fn list_all_announcements(
    req: HttpRequest,
    query: web::Query<AnnouncementListParams>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .list_all_announcements(query.into_inner(), &req)
        .await
}

pub async fn create_announcement(
    req: HttpRequest,
    body: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .create_announcement(body.into_inner(), &req)
        .await
}

pub async fn get_managed_announcement(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.get_managed_announcement(id.0, &req).await
}

pub async fn update_announcement(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .update_announcement(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.delete_announcement(id.0, &req).await
}

// 配置路由，`/manage` 须先于 `/{id}` 注册
pub fn configure_announcement_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/announcements")
            .wrap(RequireJWT)
            .service(
                web::scope("/manage")
                    .wrap(RequireRole::new_any(UserRole::announcer_roles()))
                    .route("", web::get().to(list_all_announcements))
                    .route("", web::post().to(create_announcement))
                    .route("/{id}", web::get().to(get_managed_announcement))
                    .route("/{id}", web::put().to(update_announcement))
                    .route("/{id}", web::delete().to(delete_announcement)),
            )
            .route("", web::get().to(list_announcements))
            .route("/unread-count", web::get().to(unread_count))
            .route("/{id}", web::get().to(get_announcement))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}
