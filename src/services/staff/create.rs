use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::{CreateStaffRequest, NewStaffProfile, StaffCreatedResponse, StaffStatus},
    users::NewUser,
};
use crate::utils::accounts::{default_password, staff_username};
use crate::utils::dates::parse_flexible_date;
use crate::utils::password::hash_password;
use crate::utils::validate::{require_non_blank, validate_email, validate_phone};

fn validate_request(req: &CreateStaffRequest) -> Result<(), (ErrorCode, String)> {
    let required = [
        (&req.department, "department"),
        (&req.first_name, "first_name"),
        (&req.last_name, "last_name"),
        (&req.phone, "phone"),
    ];
    for (value, field) in required {
        require_non_blank(value, field).map_err(|msg| (ErrorCode::ValidationFailed, msg))?;
    }
    if !req.role.is_staff() {
        return Err((
            ErrorCode::StaffRoleInvalid,
            format!("Role '{}' is not a staff role", req.role),
        ));
    }
    validate_phone(req.phone.trim())
        .map_err(|msg| (ErrorCode::ValidationFailed, msg.to_string()))?;
    if let Some(ref email) = req.email {
        validate_email(email).map_err(|msg| (ErrorCode::UserEmailInvalid, msg.to_string()))?;
    }
    Ok(())
}

pub async fn create_staff(
    service: &StaffService,
    req: CreateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err((code, msg)) = validate_request(&req) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, msg)));
    }

    let storage = service.get_storage(request);

    if let Some(ref national_id) = req.national_id {
        match storage.national_id_exists(national_id, None).await {
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

    let phone = req.phone.trim().to_string();
    let suffix = &AppConfig::get().accounts.default_password_suffix;
    let password = default_password(&req.last_name, "Staff", suffix);
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return Ok(e.to_response()),
    };

    let user = NewUser {
        username: staff_username(&req.first_name, &phone),
        email: req.email,
        password_hash,
        role: req.role,
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        national_id: req.national_id,
    };

    let profile = NewStaffProfile {
        staff_id: None,
        department: req.department.trim().to_string(),
        subject: req.subject,
        hire_date: req.hire_date.as_deref().and_then(parse_flexible_date),
        salary: req.salary,
        qualifications: req.qualifications,
        status: req.status.unwrap_or(StaffStatus::Active),
        address: req.address,
        emergency_contact: req.emergency_contact,
        notes: req.notes,
        phone: Some(phone),
    };

    match storage.create_staff(user, profile).await {
        Ok(staff) => {
            tracing::info!("Staff member {} created", staff.username);
            let response = StaffCreatedResponse {
                username: staff.username.clone(),
                password,
                staff,
            };
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Staff member created successfully")))
        }
        Err(e) => {
            tracing::error!("Staff creation failed: {}", e);
            Ok(e.to_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;

    fn request(role: UserRole) -> CreateStaffRequest {
        CreateStaffRequest {
            department: "Library".to_string(),
            role,
            first_name: "Tigist".to_string(),
            last_name: "Alemu".to_string(),
            phone: "0911223344".to_string(),
            email: None,
            national_id: None,
            subject: None,
            hire_date: None,
            salary: None,
            qualifications: None,
            status: None,
            address: None,
            emergency_contact: None,
            notes: None,
        }
    }

    #[test]
    fn test_non_staff_role_is_rejected() {
        let (code, _) = validate_request(&request(UserRole::Student)).unwrap_err();
        assert_eq!(code, ErrorCode::StaffRoleInvalid);
        assert!(validate_request(&request(UserRole::Librarian)).is_ok());
    }

    #[test]
    fn test_phone_is_required() {
        let mut req = request(UserRole::StoreMan);
        req.phone = String::new();
        let (code, msg) = validate_request(&req).unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
        assert_eq!(msg, "phone is required");
    }
}
