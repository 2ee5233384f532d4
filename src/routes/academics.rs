use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::academics::requests::{
    CreateClassGroupRequest, CreateRoomRequest, CreateScheduleRequest, CreateSectionRequest,
    CreateSemesterRequest, CreateSubjectRequest, ScheduleListParams, SectionListParams,
    SubjectListParams, UpdateClassGroupRequest, UpdateRoomRequest, UpdateScheduleRequest,
    UpdateSectionRequest, UpdateSemesterRequest, UpdateSubjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AcademicsService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AcademicsService 实例
static ACADEMICS_SERVICE: Lazy<AcademicsService> = Lazy::new(AcademicsService::new_lazy);

// ---------- 科目 ----------

pub async fn list_subjects(
    req: HttpRequest,
    query: web::Query<SubjectListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_subjects(query.into_inner(), &req).await
}

pub async fn create_subject(
    req: HttpRequest,
    body: web::Json<CreateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_subject(body.into_inner(), &req).await
}

pub async fn get_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_subject(id.0, &req).await
}

pub async fn update_subject(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSubjectRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_subject(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_subject(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_subject(id.0, &req).await
}

// ---------- 学期 ----------

pub async fn list_semesters(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_semesters(&req).await
}

pub async fn create_semester(
    req: HttpRequest,
    body: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_semester(body.into_inner(), &req).await
}

pub async fn get_semester(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_semester(id.0, &req).await
}

pub async fn update_semester(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_semester(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_semester(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_semester(id.0, &req).await
}

// ---------- 年级 ----------

pub async fn list_class_groups(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_class_groups(&req).await
}

pub async fn create_class_group(
    req: HttpRequest,
    body: web::Json<CreateClassGroupRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .create_class_group(body.into_inner(), &req)
        .await
}

pub async fn get_class_group(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_class_group(id.0, &req).await
}

pub async fn update_class_group(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateClassGroupRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_class_group(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_class_group(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_class_group(id.0, &req).await
}

// ---------- 班级 ----------

pub async fn list_sections(
    req: HttpRequest,
    query: web::Query<SectionListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_sections(query.into_inner(), &req).await
}

pub async fn create_section(
    req: HttpRequest,
    body: web::Json<CreateSectionRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_section(body.into_inner(), &req).await
}

pub async fn get_section(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_section(id.0, &req).await
}

pub async fn update_section(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSectionRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_section(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_section(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_section(id.0, &req).await
}

// ---------- 教室 ----------

pub async fn list_rooms(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_rooms(&req).await
}

pub async fn create_room(
    req: HttpRequest,
    body: web::Json<CreateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_room(body.into_inner(), &req).await
}

pub async fn get_room(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_room(id.0, &req).await
}

pub async fn update_room(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateRoomRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_room(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_room(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_room(id.0, &req).await
}

// ---------- 课表 ----------

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListParams>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.list_schedules(query.into_inner(), &req).await
}

pub async fn create_schedule(
    req: HttpRequest,
    body: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.create_schedule(body.into_inner(), &req).await
}

pub async fn get_schedule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.get_schedule(id.0, &req).await
}

pub async fn update_schedule(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE
        .update_schedule(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_schedule(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACADEMICS_SERVICE.delete_schedule(id.0, &req).await
}

// 配置路由
pub fn configure_academics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academics")
            .wrap(RequireRole::new_any(UserRole::academic_roles()))
            .wrap(RequireJWT)
            .service(
                web::scope("/subjects")
                    .route("", web::get().to(list_subjects))
                    .route("", web::post().to(create_subject))
                    .route("/{id}", web::get().to(get_subject))
                    .route("/{id}", web::put().to(update_subject))
                    .route("/{id}", web::delete().to(delete_subject)),
            )
            .service(
                web::scope("/semesters")
                    .route("", web::get().to(list_semesters))
                    .route("", web::post().to(create_semester))
                    .route("/{id}", web::get().to(get_semester))
                    .route("/{id}", web::put().to(update_semester))
                    .route("/{id}", web::delete().to(delete_semester)),
            )
            .service(
                web::scope("/class-groups")
                    .route("", web::get().to(list_class_groups))
                    .route("", web::post().to(create_class_group))
                    .route("/{id}", web::get().to(get_class_group))
                    .route("/{id}", web::put().to(update_class_group))
                    .route("/{id}", web::delete().to(delete_class_group)),
            )
            .service(
                web::scope("/sections")
                    .route("", web::get().to(list_sections))
                    .route("", web::post().to(create_section))
                    .route("/{id}", web::get().to(get_section))
                    .route("/{id}", web::put().to(update_section))
                    .route("/{id}", web::delete().to(delete_section)),
            )
            .service(
                web::scope("/rooms")
                    .route("", web::get().to(list_rooms))
                    .route("", web::post().to(create_room))
                    .route("/{id}", web::get().to(get_room))
                    .route("/{id}", web::put().to(update_room))
                    .route("/{id}", web::delete().to(delete_room)),
            )
            .service(
                web::scope("/schedules")
                    .route("", web::get().to(list_schedules))
                    .route("", web::post().to(create_schedule))
                    .route("/{id}", web::get().to(get_schedule))
                    .route("/{id}", web::put().to(update_schedule))
                    .route("/{id}", web::delete().to(delete_schedule)),
            ),
    );
}
