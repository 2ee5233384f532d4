use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicsService, bad_request, deleted, not_found};
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{CreateSubjectRequest, SubjectListParams, SubjectListQuery, UpdateSubjectRequest},
};
use crate::utils::validate::require_non_blank;

fn validate_create(req: &CreateSubjectRequest) -> Result<(), String> {
    require_non_blank(&req.name, "name")?;
    require_non_blank(&req.code, "code")?;
    if req.credit_hours <= 0 {
        return Err("credit_hours must be greater than 0".to_string());
    }
    Ok(())
}

impl AcademicsService {
    pub async fn create_subject(
        &self,
        mut req: CreateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_create(&req) {
            return Ok(bad_request(msg));
        }
        req.code = req.code.trim().to_uppercase();

        match self.get_storage(request).create_subject(req).await {
            Ok(subject) => Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_subjects(
        &self,
        params: SubjectListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_subjects_with_pagination(SubjectListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Subjects retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_subject(id).await {
            Ok(Some(subject)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(subject, "Subject retrieved successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_subject(
        &self,
        id: i64,
        mut req: UpdateSubjectRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if matches!(req.credit_hours, Some(hours) if hours <= 0) {
            return Ok(bad_request("credit_hours must be greater than 0"));
        }
        req.code = req.code.map(|code| code.trim().to_uppercase());

        match self.get_storage(request).update_subject(id, req).await {
            Ok(Some(subject)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(subject, "Subject updated successfully"))),
            Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_subject(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_subject(id).await {
            Ok(true) => Ok(deleted("Subject deleted successfully")),
            Ok(false) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_hours_must_be_positive() {
        let req = CreateSubjectRequest {
            name: "Mathematics".to_string(),
            code: "math101".to_string(),
            credit_hours: 0,
            department: "Science".to_string(),
            level: "Grade 9".to_string(),
        };
        assert_eq!(
            validate_create(&req).unwrap_err(),
            "credit_hours must be greater than 0"
        );
    }
}
