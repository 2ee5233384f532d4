use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::OneOrMany;
use crate::models::records::requests::{
    CreateAttendanceRequest, CreateGradeRequest, UpdateGradeRequest,
};
use crate::models::teachers::portal::{
    AttendanceManagementParams, GradeManagementParams, MyStudentsParams, ReportParams,
};
use crate::models::teachers::requests::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<TeacherListParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn create_teacher(
    req: HttpRequest,
    body: web::Json<CreateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.create_teacher(body.into_inner(), &req).await
}

pub async fn get_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.get_teacher(id.0, &req).await
}

pub async fn update_teacher(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_teacher(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_teacher(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.delete_teacher(id.0, &req).await
}

// ---------- 教师自助 ----------

pub async fn my_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_profile(&req).await
}

pub async fn my_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_subjects(&req).await
}

pub async fn my_classes(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_classes(&req).await
}

pub async fn my_schedule(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_schedule(&req).await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceManagementParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn mark_attendance(
    req: HttpRequest,
    body: web::Json<OneOrMany<CreateAttendanceRequest>>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.mark_attendance(body.into_inner(), &req).await
}

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeManagementParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list_grades(query.into_inner(), &req).await
}

pub async fn enter_grades(
    req: HttpRequest,
    body: web::Json<OneOrMany<CreateGradeRequest>>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.enter_grades(body.into_inner(), &req).await
}

// 成绩 ID 既可放在路径中，也可放在请求体里
pub async fn update_grade(
    req: HttpRequest,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_grade(None, body.into_inner(), &req)
        .await
}

pub async fn update_grade_by_id(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE
        .update_grade(Some(id.0), body.into_inner(), &req)
        .await
}

pub async fn my_students(
    req: HttpRequest,
    query: web::Query<MyStudentsParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.my_students(query.into_inner(), &req).await
}

pub async fn dashboard_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.dashboard_summary(&req).await
}

pub async fn reports(
    req: HttpRequest,
    query: web::Query<ReportParams>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.reports(query.into_inner(), &req).await
}

pub async fn available_subjects(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.available_subjects(&req).await
}

pub async fn available_sections(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.available_sections(&req).await
}

pub async fn grade_types() -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.grade_types().await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teachers")
            .wrap(RequireJWT)
            .service(
                web::scope("/me")
                    .wrap(RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::get().to(my_profile))
                    .route("/subjects", web::get().to(my_subjects))
                    .route("/classes", web::get().to(my_classes))
                    .route("/schedule", web::get().to(my_schedule))
                    .route("/attendance", web::get().to(list_attendance))
                    .route("/attendance", web::post().to(mark_attendance))
                    .route("/grades", web::get().to(list_grades))
                    .route("/grades", web::post().to(enter_grades))
                    .route("/grades", web::put().to(update_grade))
                    .route("/grades/{id}", web::put().to(update_grade_by_id))
                    .route("/students", web::get().to(my_students))
                    .route("/dashboard", web::get().to(dashboard_summary))
                    .route("/reports", web::get().to(reports))
                    .route("/available-subjects", web::get().to(available_subjects))
                    .route("/available-sections", web::get().to(available_sections))
                    .route("/grade-types", web::get().to(grade_types)),
            )
            .service(
                web::scope("")
                    .wrap(RequireRole::new_any(UserRole::hr_roles()))
                    .route("", web::get().to(list_teachers))
                    .route("", web::post().to(create_teacher))
                    .route("/{id}", web::get().to(get_teacher))
                    .route("/{id}", web::put().to(update_teacher))
                    .route("/{id}", web::delete().to(delete_teacher)),
            ),
    );
}
