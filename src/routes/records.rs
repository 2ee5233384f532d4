use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::records::requests::{
    AttendanceFilter, CreateAttendanceRequest, CreateGradeRequest, GradeFilter,
    UpdateAttendanceRequest, UpdateGradeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::RecordService;
use crate::utils::SafeIDI64;

// 管理端成绩与考勤，教师自助见 teachers 路由
static RECORD_SERVICE: Lazy<RecordService> = Lazy::new(RecordService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeFilter>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn create_grade(
    req: HttpRequest,
    body: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.create_grade(body.into_inner(), &req).await
}

pub async fn get_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.get_grade(id.0, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE
        .update_grade(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_grade(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.delete_grade(id.0, &req).await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceFilter>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.list_attendance(query.into_inner(), &req).await
}

pub async fn create_attendance(
    req: HttpRequest,
    body: web::Json<CreateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.create_attendance(body.into_inner(), &req).await
}

pub async fn get_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.get_attendance(id.0, &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    RECORD_SERVICE
        .update_attendance(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RECORD_SERVICE.delete_attendance(id.0, &req).await
}

pub fn configure_record_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(RequireRole::new_any(UserRole::academic_roles()))
            .wrap(RequireJWT)
            .route("", web::get().to(list_grades))
            .route("", web::post().to(create_grade))
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}", web::put().to(update_grade))
            .route("/{id}", web::delete().to(delete_grade)),
    )
    .service(
        web::scope("/api/v1/attendance")
            .wrap(RequireRole::new_any(UserRole::academic_roles()))
            .wrap(RequireJWT)
            .route("", web::get().to(list_attendance))
            .route("", web::post().to(create_attendance))
            .route("/{id}", web::get().to(get_attendance))
            .route("/{id}", web::put().to(update_attendance))
            .route("/{id}", web::delete().to(delete_attendance)),
    );
}
