use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{InventoryService, bad_request, current_user_id, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    inventory::{
        CreateMaterialRequest, IssueMaterialRequest, IssuedListParams, MaterialListParams,
        MaterialListQuery, NewIssue, ReturnMaterialRequest, UpdateMaterialRequest,
        validate_quantities,
    },
};
use crate::utils::{dates, validate::require_non_blank};

fn material_not_found() -> HttpResponse {
    not_found(ErrorCode::MaterialNotFound, "Material not found")
}

impl InventoryService {
    /// 未指定管理人时由当前用户管理
    pub async fn create_material(
        &self,
        mut req: CreateMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let user_id = match current_user_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };
        if let Err(msg) = require_non_blank(&req.name, "name") {
            return Ok(bad_request(msg));
        }
        if let Err(msg) = validate_quantities(
            req.quantity_total,
            req.quantity_available.unwrap_or(req.quantity_total),
        ) {
            return Ok(bad_request(msg));
        }
        req.managed_by = req.managed_by.or(Some(user_id));

        match self.get_storage(request).create_material(req).await {
            Ok(material) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(material, "Material created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_materials(
        &self,
        params: MaterialListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_materials_with_pagination(MaterialListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Materials retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_material(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_material(id).await {
            Ok(Some(material)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(material, "Material retrieved successfully"))),
            Ok(None) => Ok(material_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_material(
        &self,
        id: i64,
        req: UpdateMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).update_material(id, req).await {
            Ok(Some(material)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(material, "Material updated successfully"))),
            Ok(None) => Ok(material_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_material(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_material(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Material deleted successfully"))),
            Ok(false) => Ok(material_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 领用：库存不足返回 409
    pub async fn issue_material(
        &self,
        req: IssueMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if req.quantity <= 0 {
            return Ok(bad_request("quantity must be greater than 0"));
        }
        let issue = NewIssue {
            material_id: req.material_id,
            issued_to: req.issued_to,
            quantity: req.quantity,
            issue_date: req.issue_date.unwrap_or_else(dates::today),
            expected_return_date: req.expected_return_date,
        };

        match self.get_storage(request).issue_material(issue).await {
            Ok(issued) => {
                tracing::info!(
                    "Issued {} of material {} to user {}",
                    issued.quantity,
                    issued.material_id,
                    issued.issued_to
                );
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(issued, "Material issued successfully")))
            }
            Err(e) => Ok(e.to_response_with(
                ErrorCode::InsufficientStock,
                ErrorCode::MaterialNotFound,
            )),
        }
    }

    pub async fn return_material(
        &self,
        issue_id: i64,
        req: ReturnMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let return_date = req.actual_return_date.unwrap_or_else(dates::today);

        match self
            .get_storage(request)
            .return_material(issue_id, return_date)
            .await
        {
            Ok(issued) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(issued, "Material returned successfully"))),
            Err(e) => Ok(e.to_response_with(
                ErrorCode::AlreadyReturned,
                ErrorCode::IssueRecordNotFound,
            )),
        }
    }

    pub async fn list_issued_materials(
        &self,
        params: IssuedListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).list_issued_materials(params).await {
            Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                records,
                "Issued materials retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    /// 当前用户管理的物资汇总
    pub async fn store_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user_id = match current_user_id(request) {
            Ok(id) => id,
            Err(response) => return Ok(response),
        };

        match self.get_storage(request).store_summary(user_id).await {
            Ok(summary) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(summary, "Store summary retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantities() {
        assert!(validate_quantities(10, 10).is_ok());
        assert!(validate_quantities(10, 0).is_ok());
        assert!(validate_quantities(10, 11).is_err());
        assert!(validate_quantities(-1, 0).is_err());
    }
}
