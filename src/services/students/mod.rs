pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod portal;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::students::{CreateStudentRequest, StudentListParams, UpdateStudentRequest};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn create_student(
        &self,
        req: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, req, request).await
    }

    pub async fn list_students(
        &self,
        query: StudentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        req: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, req, request).await
    }

    pub async fn delete_student(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    // 导出 CSV
    pub async fn export_students(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        export::export_students(self, request).await
    }

    // 导入 CSV
    pub async fn import_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, payload, request).await
    }

    // 学生本人
    pub async fn my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::my_profile(self, request).await
    }

    pub async fn my_grades(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::my_grades(self, request).await
    }

    pub async fn my_attendance(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::my_attendance(self, request).await
    }

    pub async fn my_library(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::my_library(self, request).await
    }
}
