use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::inventory::requests::{
    AssetListParams, CreateAssetAuditRequest, CreateAssetCategoryRequest, CreateAssetRequest,
    CreateMaterialRequest, IssueMaterialRequest, IssuedListParams, MaterialListParams,
    ReturnMaterialRequest, UpdateAssetRequest, UpdateMaterialRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InventoryService;
use crate::utils::SafeIDI64;

// 懒加载的全局 InventoryService 实例
static INVENTORY_SERVICE: Lazy<InventoryService> = Lazy::new(InventoryService::new_lazy);

// ---------- 仓库物资 ----------

pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialListParams>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.list_materials(query.into_inner(), &req).await
}

pub async fn create_material(
    req: HttpRequest,
    body: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.create_material(body.into_inner(), &req).await
}

pub async fn get_material(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.get_material(id.0, &req).await
}

pub async fn update_material(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .update_material(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_material(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.delete_material(id.0, &req).await
}

pub async fn store_summary(req: HttpRequest) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.store_summary(&req).await
}

// ---------- 领用 ----------

pub async fn list_issued_materials(
    req: HttpRequest,
    query: web::Query<IssuedListParams>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .list_issued_materials(query.into_inner(), &req)
        .await
}

pub async fn issue_material(
    req: HttpRequest,
    body: web::Json<IssueMaterialRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.issue_material(body.into_inner(), &req).await
}

pub async fn return_material(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<ReturnMaterialRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    INVENTORY_SERVICE.return_material(id.0, body, &req).await
}

// ---------- 资产 ----------

pub async fn list_asset_categories(req: HttpRequest) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.list_asset_categories(&req).await
}

pub async fn create_asset_category(
    req: HttpRequest,
    body: web::Json<CreateAssetCategoryRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .create_asset_category(body.into_inner(), &req)
        .await
}

pub async fn delete_asset_category(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.delete_asset_category(id.0, &req).await
}

pub async fn list_assets(
    req: HttpRequest,
    query: web::Query<AssetListParams>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.list_assets(query.into_inner(), &req).await
}

pub async fn create_asset(
    req: HttpRequest,
    body: web::Json<CreateAssetRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.create_asset(body.into_inner(), &req).await
}

pub async fn get_asset(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.get_asset(id.0, &req).await
}

pub async fn update_asset(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAssetRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .update_asset(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_asset(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.delete_asset(id.0, &req).await
}

pub async fn list_asset_audits(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE.list_asset_audits(id.0, &req).await
}

pub async fn create_asset_audit(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<CreateAssetAuditRequest>,
) -> ActixResult<HttpResponse> {
    INVENTORY_SERVICE
        .create_asset_audit(id.0, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_inventory_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/inventory")
            .wrap(RequireRole::new_any(UserRole::inventory_roles()))
            .wrap(RequireJWT)
            .route("/summary", web::get().to(store_summary))
            .service(
                web::scope("/materials")
                    .route("", web::get().to(list_materials))
                    .route("", web::post().to(create_material))
                    .route("/{id}", web::get().to(get_material))
                    .route("/{id}", web::put().to(update_material))
                    .route("/{id}", web::delete().to(delete_material)),
            )
            .service(
                web::scope("/issues")
                    .route("", web::get().to(list_issued_materials))
                    .route("", web::post().to(issue_material))
                    .route("/{id}/return", web::post().to(return_material)),
            )
            .service(
                web::scope("/asset-categories")
                    .route("", web::get().to(list_asset_categories))
                    .route("", web::post().to(create_asset_category))
                    .route("/{id}", web::delete().to(delete_asset_category)),
            )
            .service(
                web::scope("/assets")
                    .route("", web::get().to(list_assets))
                    .route("", web::post().to(create_asset))
                    .route("/{id}", web::get().to(get_asset))
                    .route("/{id}", web::put().to(update_asset))
                    .route("/{id}", web::delete().to(delete_asset))
                    .route("/{id}/audits", web::get().to(list_asset_audits))
                    .route("/{id}/audits", web::post().to(create_asset_audit)),
            ),
    );
}
