use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{CreateTeacherRequest, NewTeacherProfile, TeacherCreatedResponse},
    users::{NewUser, UserRole},
};
use crate::utils::accounts::{default_password, teacher_username};
use crate::utils::password::hash_password;
use crate::utils::validate::{require_non_blank, validate_email, validate_national_id};

fn validate_request(req: &CreateTeacherRequest) -> Result<(), (ErrorCode, String)> {
    let required = [
        (&req.first_name, "first_name"),
        (&req.last_name, "last_name"),
        (&req.national_id, "national_id"),
        (&req.department, "department"),
        (&req.academic_rank, "academic_rank"),
    ];
    for (value, field) in required {
        require_non_blank(value, field).map_err(|msg| (ErrorCode::ValidationFailed, msg))?;
    }
    validate_national_id(req.national_id.trim())
        .map_err(|msg| (ErrorCode::ValidationFailed, msg.to_string()))?;
    if let Some(ref email) = req.email {
        validate_email(email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg.to_string()))?;
    }
    Ok(())
}

pub async fn create_teacher(
    service: &TeacherService,
    req: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err((code, msg)) = validate_request(&req) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request);
    let national_id = req.national_id.trim().to_string();

    match storage.national_id_exists(&national_id, None).await {
        Ok(true) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NationalIdAlreadyExists,
                "National ID is already registered",
            )));
        }
        Ok(false) => {}
        Err(e) => return Ok(e.to_response()),
    }

    let suffix = &AppConfig::get().accounts.default_password_suffix;
    let password = default_password(&req.last_name, "Teacher", suffix);
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_response()),
    };

    let user = NewUser {
        username: teacher_username(&req.first_name, &national_id),
        email: req.email,
        password_hash,
        role: UserRole::Teacher,
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        national_id: Some(national_id),
    };

    let profile = NewTeacherProfile {
        department: req.department.trim().to_string(),
        hire_date: req.hire_date,
        academic_rank: req.academic_rank.trim().to_string(),
        subjects: req.subjects,
    };

    match storage.create_teacher(user, profile).await {
        Ok(teacher) => {
            tracing::info!(
                "Teacher {} created with username {}",
                teacher.employee_id,
                teacher.username
            );
            let response = TeacherCreatedResponse {
                username: teacher.username.clone(),
                employee_id: teacher.employee_id.clone(),
                password,
                teacher,
            };
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Teacher created successfully")))
        }
        Err(e) => {
            tracing::error!("Teacher creation failed: {}", e);
            Ok(e.to_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTeacherRequest {
        CreateTeacherRequest {
            first_name: "Dawit".to_string(),
            last_name: "Haile".to_string(),
            national_id: "ET1234567788".to_string(),
            department: "Science".to_string(),
            hire_date: chrono::NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            academic_rank: "Lecturer".to_string(),
            email: None,
            subjects: vec![],
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn test_national_id_format() {
        let mut req = request();
        req.national_id = "12".to_string();
        let (code, _) = validate_request(&req).unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_academic_rank_required() {
        let mut req = request();
        req.academic_rank = " ".to_string();
        let (_, msg) = validate_request(&req).unwrap_err();
        assert_eq!(msg, "academic_rank is required");
    }
}
