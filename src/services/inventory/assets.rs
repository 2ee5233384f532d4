use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InventoryService, bad_request, current_user_id, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    inventory::{
        AssetListParams, AssetListQuery, CreateAssetAuditRequest, CreateAssetCategoryRequest,
        CreateAssetRequest, UpdateAssetRequest,
    },
};
use crate::utils::validate::require_non_blank;

fn asset_not_found() -> HttpResponse {
    not_found(ErrorCode::AssetNotFound, "Asset not found")
}

impl InventoryService {
    // ---------- 资产类别 ----------

    pub async fn list_asset_categories(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_asset_categories().await {
            Ok(categories) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                categories,
                "Asset categories retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn create_asset_category(
        &self,
        req: CreateAssetCategoryRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }

        match self.get_storage(request).create_asset_category(req).await {
            Ok(category) => Ok(HttpResponse::Created().json(ApiResponse::success(
                category,
                "Asset category created successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_asset_category(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_asset_category(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Asset category deleted successfully",
            ))),
            Ok(false) => Ok(not_found(
                ErrorCode::AssetCategoryNotFound,
                "Asset category not found",
            )),
            Err(e) => Ok(e.to_response()),
        }
    }

    // ---------- 资产 ----------

    /// 登记人为当前用户
    pub async fn create_asset(
        &self,
        req: CreateAssetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user_id = match current_user_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        if let Err(msg) = require_non_blank(&req.name, "name")
            .and_then(|_| require_non_blank(&req.serial_number, "serial_number"))
        {
            return Ok(bad_request(msg));
        }

        match self.get_storage(request).create_asset(req, user_id).await {
            Ok(asset) => {
                tracing::info!("Asset {} registered by user {}", asset.serial_number, user_id);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(asset, "Asset created successfully")))
            }
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_assets(
        &self,
        params: AssetListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_assets_with_pagination(AssetListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Assets retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_asset(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_asset(id).await {
            Ok(Some(asset)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(asset, "Asset retrieved successfully"))),
            Ok(None) => Ok(asset_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_asset(
        &self,
        id: i64,
        req: UpdateAssetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).update_asset(id, req).await {
            Ok(Some(asset)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(asset, "Asset updated successfully"))),
            Ok(None) => Ok(asset_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_asset(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_asset(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Asset deleted successfully"))),
            Ok(false) => Ok(asset_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    // ---------- 盘点 ----------

    pub async fn list_asset_audits(
        &self,
        asset_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.get_asset(asset_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(asset_not_found()),
            Err(e) => return Ok(e.to_response()),
        }

        match storage.list_asset_audits(asset_id).await {
            Ok(audits) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(audits, "Asset audits retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 盘点记录的状态同时写回资产
    pub async fn create_asset_audit(
        &self,
        asset_id: i64,
        req: CreateAssetAuditRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user_id = match current_user_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        match self
            .get_storage(request)
            .create_asset_audit(asset_id, user_id, req)
            .await
        {
            Ok(audit) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(audit, "Asset audit recorded successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }
}
