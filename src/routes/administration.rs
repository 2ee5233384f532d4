use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::administration::requests::{
    CreateSchoolRequest, CreateWeredaRequest, RegisterSchoolManagerRequest,
    RegisterSupervisorRequest, RegisterWeredaOfficerRequest, SchoolListParams,
    UpdateSchoolRequest, UpdateWeredaRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AdministrationService;
use crate::utils::SafeIDI64;

static ADMINISTRATION_SERVICE: Lazy<AdministrationService> =
    Lazy::new(AdministrationService::new_lazy);

pub async fn list_weredas(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.list_weredas(&req).await
}

pub async fn create_wereda(
    req: HttpRequest,
    body: web::Json<CreateWeredaRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .create_wereda(body.into_inner(), &req)
        .await
}

pub async fn get_wereda(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.get_wereda(id.0, &req).await
}

pub async fn update_wereda(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateWeredaRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .update_wereda(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_wereda(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.delete_wereda(id.0, &req).await
}

pub async fn list_schools(
    req: HttpRequest,
    query: web::Query<SchoolListParams>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .list_schools(query.into_inner(), &req)
        .await
}

pub async fn create_school(
    req: HttpRequest,
    body: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .create_school(body.into_inner(), &req)
        .await
}

pub async fn get_school(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.get_school(id.0, &req).await
}

pub async fn update_school(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .update_school(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_school(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE.delete_school(id.0, &req).await
}

pub async fn register_wereda_officer(
    req: HttpRequest,
    body: web::Json<RegisterWeredaOfficerRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .register_wereda_officer(body.into_inner(), &req)
        .await
}

pub async fn register_school_manager(
    req: HttpRequest,
    body: web::Json<RegisterSchoolManagerRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .register_school_manager(body.into_inner(), &req)
        .await
}

pub async fn register_supervisor(
    req: HttpRequest,
    body: web::Json<RegisterSupervisorRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATION_SERVICE
        .register_supervisor(body.into_inner(), &req)
        .await
}

// 配置路由，区级账号只能由上级行政机关注册
pub fn configure_administration_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/weredas")
            .wrap(RequireRole::new_any(UserRole::administration_roles()))
            .wrap(RequireJWT)
            .route("", web::get().to(list_weredas))
            .route("", web::post().to(create_wereda))
            .route("/{id}", web::get().to(get_wereda))
            .route("/{id}", web::put().to(update_wereda))
            .route("/{id}", web::delete().to(delete_wereda)),
    )
    .service(
        web::scope("/api/v1/schools")
            .wrap(RequireRole::new_any(UserRole::administration_roles()))
            .wrap(RequireJWT)
            .route("", web::get().to(list_schools))
            .route("", web::post().to(create_school))
            .route("/{id}", web::get().to(get_school))
            .route("/{id}", web::put().to(update_school))
            .route("/{id}", web::delete().to(delete_school)),
    )
    .service(
        web::scope("/api/v1/registrations")
            .wrap(RequireRole::new_any(UserRole::administration_roles()))
            .wrap(RequireJWT)
            .service(
                web::resource("/wereda-officers")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::post().to(register_wereda_officer)),
            )
            .route("/school-managers", web::post().to(register_school_manager))
            .route("/supervisors", web::post().to(register_supervisor)),
    );
}
