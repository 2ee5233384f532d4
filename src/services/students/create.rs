use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::config::AppConfig;
use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        CreateStudentRequest, DEFAULT_ACADEMIC_STATUS, NewStudentProfile, StudentCreatedResponse,
    },
    users::{NewUser, UserRole},
};
use crate::utils::accounts::default_password;
use crate::utils::dates::parse_flexible_date;
use crate::utils::password::hash_password;
use crate::utils::validate::{require_non_blank, validate_email};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 校验必填字段，返回第一个错误
pub(super) fn validate_request(req: &CreateStudentRequest) -> Result<(), String> {
    require_non_blank(&req.admission_no, "admission_no")?;
    require_non_blank(&req.class_section, "class_section")?;
    require_non_blank(&req.first_name, "first_name")?;
    require_non_blank(&req.last_name, "last_name")?;
    if let Some(email) = req.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validate_email(email.trim()).map_err(str::to_string)?;
    }
    Ok(())
}

/// 请求拆分为账号与档案，返回明文默认密码
///
/// 用户名留空，由存储层在生成学号后派生。
pub(super) fn build_student(
    req: CreateStudentRequest,
) -> Result<(NewUser, NewStudentProfile, String), SchoolError> {
    let suffix = &AppConfig::get().accounts.default_password_suffix;
    let password = default_password(&req.last_name, "Student", suffix);
    let password_hash = hash_password(&password)?;

    let user = NewUser {
        username: String::new(),
        email: non_blank(req.email),
        password_hash,
        role: UserRole::Student,
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        national_id: non_blank(req.national_id),
    };

    let profile = NewStudentProfile {
        admission_no: req.admission_no.trim().to_string(),
        student_id: non_blank(req.student_id),
        class_section: req.class_section.trim().to_string(),
        department: non_blank(req.department),
        year: req.year,
        academic_status: non_blank(req.academic_status)
            .unwrap_or_else(|| DEFAULT_ACADEMIC_STATUS.to_string()),
        enrollment_date: req.enrollment_date.as_deref().and_then(parse_flexible_date),
        gender: non_blank(req.gender),
        dob: req.dob.as_deref().and_then(parse_flexible_date),
        phone: non_blank(req.phone),
        address: non_blank(req.address),
        blood_group: non_blank(req.blood_group),
        medical_condition: non_blank(req.medical_condition),
        extra_activities: non_blank(req.extra_activities),
        remarks: non_blank(req.remarks),
        father_name: non_blank(req.father_name),
        mother_name: non_blank(req.mother_name),
        guardian_contact: non_blank(req.guardian_contact),
        guardian_email: non_blank(req.guardian_email),
        guardian_relation: non_blank(req.guardian_relation),
    };

    Ok((user, profile, password))
}

pub async fn create_student(
    service: &StudentService,
    req: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_request(&req) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
    }

    let storage = service.get_storage(request);

    if let Some(national_id) = req.national_id.as_deref().filter(|v| !v.trim().is_empty()) {
        match storage.national_id_exists(national_id.trim(), None).await {
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

    let (user, profile, password) = match build_student(req) {
        Ok(parts) => parts,
        Err(e) => return Ok(e.to_response()),
    };

    match storage.create_student(user, profile).await {
        Ok(student) => {
            tracing::info!(
                "Student {} created with username {}",
                student.admission_no,
                student.username
            );
            let response = StudentCreatedResponse {
                username: student.username.clone(),
                student_id: student.student_id.clone().unwrap_or_default(),
                password,
                student,
            };
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Student created successfully")))
        }
        Err(e) => {
            tracing::error!("Student creation failed: {}", e);
            Ok(e.to_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            admission_no: "ADM-101".to_string(),
            class_section: "Grade 9 - A".to_string(),
            first_name: "Abebe".to_string(),
            last_name: "Kebede".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_class_section_is_rejected() {
        let mut req = request();
        req.class_section = "  ".to_string();
        assert_eq!(
            validate_request(&req).unwrap_err(),
            "class_section is required"
        );
    }

    #[test]
    fn test_blank_email_is_ignored() {
        let mut req = request();
        req.email = Some(" ".to_string());
        assert!(validate_request(&req).is_ok());
        req.email = Some("not-an-email".to_string());
        assert!(validate_request(&req).is_err());
    }

    #[test]
    fn test_unparseable_dates_become_null() {
        let mut req = request();
        req.dob = Some("31/12/2008".to_string());
        req.enrollment_date = Some("sometime".to_string());
        let (user, profile, password) = build_student(req).unwrap();
        assert_eq!(profile.dob, chrono::NaiveDate::from_ymd_opt(2008, 12, 31));
        assert_eq!(profile.enrollment_date, None);
        assert_eq!(profile.academic_status, DEFAULT_ACADEMIC_STATUS);
        assert_eq!(password, "Kebede#123");
        assert_eq!(user.role, UserRole::Student);
    }
}
