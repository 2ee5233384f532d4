use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{UserService, bad_request};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{CreateUserRequest, NewUser},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    require_non_blank, validate_email, validate_national_id, validate_password_simple,
    validate_username,
};

fn validate_request(req: &CreateUserRequest) -> Result<(), (ErrorCode, String)> {
    validate_username(&req.username).map_err(|m| (ErrorCode::UserNameInvalid, m.to_string()))?;
    if let Some(ref email) = req.email {
        validate_email(email).map_err(|m| (ErrorCode::UserEmailInvalid, m.to_string()))?;
    }
    if let Some(ref national_id) = req.national_id {
        validate_national_id(national_id)
            .map_err(|m| (ErrorCode::ValidationFailed, m.to_string()))?;
    }
    require_non_blank(&req.first_name, "first_name")
        .map_err(|m| (ErrorCode::ValidationFailed, m))?;
    validate_password_simple(&req.password)
        .map_err(|m| (ErrorCode::PasswordPolicyViolation, m.to_string()))
}

impl UserService {
    /// 管理员指定的用户名不做自动后缀，重名直接 409
    pub async fn create_user(
        &self,
        req: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err((code, msg)) = validate_request(&req) {
            return Ok(bad_request(code, msg));
        }

        let storage = self.get_storage(request);

        let national_id_taken = async {
            match req.national_id {
                Some(ref id) => storage.national_id_exists(id, None).await,
                None => Ok(false),
            }
        };
        let (existing, national_id_taken) = match tokio::try_join!(
            storage.get_user_by_username(&req.username),
            national_id_taken
        ) {
            Ok(result) => result,
            Err(e) => return Ok(e.to_response()),
        };
        if existing.is_some() {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "Username already exists",
            )));
        }
        if national_id_taken {
            return Ok(bad_request(
                ErrorCode::NationalIdAlreadyExists,
                "National ID is already registered",
            ));
        }

        let password_hash = match hash_password(&req.password) {
            Ok(hash) => hash,
            Err(e) => return Ok(e.to_response()),
        };

        let new_user = NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: req.role,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            national_id: req.national_id,
        };

        match storage.create_user(new_user).await {
            Ok(user) => {
                info!("Account {} created with role {}", user.username, user.role);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(user, "User created successfully")))
            }
            Err(e) => {
                error!("User creation failed: {}", e);
                Ok(e.to_response_with(ErrorCode::UserEmailAlreadyExists, ErrorCode::UserNotFound))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            username: "zone_office".to_string(),
            email: Some("zone@moe.gov.et".to_string()),
            password: "Zone#2024".to_string(),
            role: UserRole::ZoneOffice,
            first_name: "Zone".to_string(),
            last_name: "Office".to_string(),
            national_id: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn test_blank_first_name_is_rejected() {
        let req = CreateUserRequest {
            first_name: "  ".to_string(),
            ..request()
        };
        let (code, msg) = validate_request(&req).unwrap_err();
        assert_eq!(code, ErrorCode::ValidationFailed);
        assert_eq!(msg, "first_name is required");
    }

    #[test]
    fn test_bad_email_uses_email_code() {
        let req = CreateUserRequest {
            email: Some("not-an-email".to_string()),
            ..request()
        };
        assert_eq!(
            validate_request(&req).unwrap_err().0,
            ErrorCode::UserEmailInvalid
        );
    }
}
