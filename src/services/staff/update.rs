use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::{StaffProfileChanges, UpdateStaffRequest},
    users::UserChanges,
};
use crate::utils::accounts::staff_username;
use crate::utils::dates::parse_optional_date;
use crate::utils::validate::{validate_email, validate_phone};

pub async fn update_staff(
    service: &StaffService,
    id: i64,
    req: UpdateStaffRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(role) = req.role
        && !role.is_staff()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StaffRoleInvalid,
            format!("Role '{role}' is not a staff role"),
        )));
    }
    if let Some(ref phone) = req.phone
        && let Err(msg) = validate_phone(phone)
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

    let existing = match storage.get_staff(id).await {
        Ok(Some(staff)) => staff,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StaffNotFound,
                "Staff member not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };

    // 名字或手机号变化时重新派生用户名
    let first_name = req.first_name.as_deref().unwrap_or(&existing.first_name);
    let phone = req
        .phone
        .as_deref()
        .or(existing.phone.as_deref())
        .unwrap_or_default();
    let username = (first_name != existing.first_name
        || Some(phone) != existing.phone.as_deref())
    .then(|| staff_username(first_name, phone));

    let user = UserChanges {
        username,
        email: req.email,
        role: req.role,
        first_name: req.first_name,
        last_name: req.last_name,
        ..Default::default()
    };

    let profile = StaffProfileChanges {
        staff_id: None,
        department: req.department,
        subject: req.subject,
        hire_date: parse_optional_date(req.hire_date.as_deref()),
        salary: req.salary,
        qualifications: req.qualifications,
        status: req.status,
        address: req.address,
        emergency_contact: req.emergency_contact,
        notes: req.notes,
        phone: req.phone,
    };

    match storage.update_staff(id, user, profile).await {
        Ok(Some(staff)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            staff,
            "Staff member updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StaffNotFound,
            "Staff member not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update staff {}: {}", id, e);
            Ok(e.to_response())
        }
    }
}
