pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::staff::{CreateStaffRequest, StaffListParams, UpdateStaffRequest};
use crate::storage::Storage;

pub struct StaffService {
    storage: Option<Arc<dyn Storage>>,
}

impl StaffService {
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

    pub async fn create_staff(
        &self,
        req: CreateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_staff(self, req, request).await
    }

    pub async fn list_staff(
        &self,
        query: StaffListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_staff(self, query, request).await
    }

    pub async fn get_staff(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_staff(self, id, request).await
    }

    pub async fn update_staff(
        &self,
        id: i64,
        req: UpdateStaffRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_staff(self, id, req, request).await
    }

    pub async fn delete_staff(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_staff(self, id, request).await
    }
}
