use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT, RequireRole};
use crate::models::students::requests::{
    CreateStudentRequest, StudentListParams, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentService 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

pub async fn export_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.export_students(&req).await
}

pub async fn import_students(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.import_students(payload, &req).await
}

// 学生自助
pub async fn my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_profile(&req).await
}

pub async fn my_grades(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_grades(&req).await
}

pub async fn my_attendance(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_attendance(&req).await
}

pub async fn my_library(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.my_library(&req).await
}

// 配置路由，`/me` 与 `/export`、`/import` 须先于 `/{id}` 注册
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(RequireJWT)
            .service(
                web::scope("/me")
                    .wrap(RequireRole::new_any(UserRole::student_roles()))
                    .route("", web::get().to(my_profile))
                    .route("/grades", web::get().to(my_grades))
                    .route("/attendance", web::get().to(my_attendance))
                    .route("/library", web::get().to(my_library)),
            )
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::registrar_roles()))
                    .route("", web::get().to(list_students))
                    .route("", web::post().to(create_student))
                    .route("/export", web::get().to(export_students))
                    .service(
                        web::resource("/import")
                            .wrap(RateLimit::import())
                            .route(web::post().to(import_students)),
                    )
                    .route("/{id}", web::get().to(get_student))
                    .route("/{id}", web::put().to(update_student))
                    .route("/{id}", web::delete().to(delete_student)),
            ),
    );
}
