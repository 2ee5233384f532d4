use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{TeacherProfileChanges, UpdateTeacherRequest},
    users::UserChanges,
};
use crate::utils::accounts::teacher_username;
use crate::utils::validate::{validate_email, validate_national_id};

pub async fn update_teacher(
    service: &TeacherService,
    id: i64,
    req: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref national_id) = req.national_id
        && let Err(msg) = validate_national_id(national_id)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }
    if let Some(ref email) = req.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    let storage = service.get_storage(request);

    let existing = match storage.get_teacher(id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TeacherNotFound,
                "Teacher not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    if let Some(ref national_id) = req.national_id {
        match storage
            .national_id_exists(national_id, Some(existing.user_id))
            .await
        {
            Ok(true) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::NationalIdAlreadyExists,
                    "National ID is already registered",
                )));
            }
            Ok(false) => {}
            Err(e) => return Ok(e.to_response()),
        }
    }

    // 名字或身份证号变化时重新派生用户名
    let first_name = req.first_name.as_deref().unwrap_or(&existing.first_name);
    let national_id = req
        .national_id
        .as_deref()
        .or(existing.national_id.as_deref())
        .unwrap_or_default();
    let username = (first_name != existing.first_name
        || Some(national_id) != existing.national_id.as_deref())
    .then(|| teacher_username(first_name, national_id));

    let user = UserChanges {
        username,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        national_id: req.national_id,
        ..Default::default()
    };

    let profile = TeacherProfileChanges {
        employee_id: None,
        department: req.department,
        hire_date: req.hire_date,
        academic_rank: req.academic_rank,
        subjects: req.subjects,
    };

    match storage.update_teacher(id, user, profile).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update teacher {}: {}", id, e);
            Ok(e.to_response())
        }
    }
}
