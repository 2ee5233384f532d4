use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{StudentProfileChanges, UpdateStudentRequest},
    users::UserChanges,
};
use crate::utils::accounts::student_username;
use crate::utils::dates::parse_optional_date;
use crate::utils::validate::validate_email;

pub async fn update_student(
    service: &StudentService,
    id: i64,
    req: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_student(id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    if let Some(ref email) = req.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

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

    // 名字变化时重新派生用户名
    let username = req
        .first_name
        .as_deref()
        .filter(|name| *name != existing.first_name)
        .map(|name| student_username(name, existing.student_id.as_deref().unwrap_or_default()));

    let user = UserChanges {
        username,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        national_id: req.national_id,
        ..Default::default()
    };

    let profile = StudentProfileChanges {
        admission_no: req.admission_no,
        student_id: None,
        class_section: req.class_section,
        department: req.department,
        year: req.year,
        academic_status: req.academic_status,
        enrollment_date: parse_optional_date(req.enrollment_date.as_deref()),
        gender: req.gender,
        dob: parse_optional_date(req.dob.as_deref()),
        phone: req.phone,
        address: req.address,
        blood_group: req.blood_group,
        medical_condition: req.medical_condition,
        extra_activities: req.extra_activities,
        remarks: req.remarks,
        father_name: req.father_name,
        mother_name: req.mother_name,
        guardian_contact: req.guardian_contact,
        guardian_email: req.guardian_email,
        guardian_relation: req.guardian_relation,
    };

    match storage.update_student(id, user, profile).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update student {}: {}", id, e);
            Ok(e.to_response())
        }
    }
}
