pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod portal;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::OneOrMany;
use crate::models::records::{CreateAttendanceRequest, CreateGradeRequest, UpdateGradeRequest};
use crate::models::teachers::{
    CreateTeacherRequest, TeacherListParams, UpdateTeacherRequest,
    portal::{AttendanceManagementParams, GradeManagementParams, MyStudentsParams, ReportParams},
};
use crate::storage::Storage;

pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // ---------- 管理端 ----------

    pub async fn create_teacher(
        &self,
        req: CreateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_teacher(self, req, request).await
    }

    pub async fn list_teachers(
        &self,
        query: TeacherListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_teachers(self, query, request).await
    }

    pub async fn get_teacher(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_teacher(self, id, request).await
    }

    pub async fn update_teacher(
        &self,
        id: i64,
        req: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_teacher(self, id, req, request).await
    }

    pub async fn delete_teacher(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_teacher(self, id, request).await
    }

    // ---------- 教师本人 ----------

    pub async fn my_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::profile::my_profile(self, request).await
    }

    pub async fn my_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::subjects::my_subjects(self, request).await
    }

    pub async fn my_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::classes::my_classes(self, request).await
    }

    pub async fn my_schedule(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::schedule::my_schedule(self, request).await
    }

    pub async fn list_attendance(
        &self,
        params: AttendanceManagementParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::attendance::list_attendance(self, params, request).await
    }

    pub async fn mark_attendance(
        &self,
        body: OneOrMany<CreateAttendanceRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::attendance::mark_attendance(self, body, request).await
    }

    pub async fn list_grades(
        &self,
        params: GradeManagementParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::grades::list_grades(self, params, request).await
    }

    pub async fn enter_grades(
        &self,
        body: OneOrMany<CreateGradeRequest>,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::grades::enter_grades(self, body, request).await
    }

    pub async fn update_grade(
        &self,
        id: Option<i64>,
        req: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::grades::update_grade(self, id, req, request).await
    }

    pub async fn my_students(
        &self,
        params: MyStudentsParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::students::my_students(self, params, request).await
    }

    pub async fn dashboard_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::dashboard::dashboard_summary(self, request).await
    }

    pub async fn reports(
        &self,
        params: ReportParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        portal::reports::reports(self, params, request).await
    }

    pub async fn available_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::utilities::available_subjects(self, request).await
    }

    pub async fn available_sections(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        portal::utilities::available_sections(self, request).await
    }

    pub async fn grade_types(&self) -> ActixResult<HttpResponse> {
        portal::utilities::grade_types().await
    }
}
