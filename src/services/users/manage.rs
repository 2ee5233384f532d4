use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, bad_request, user_not_found};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{UpdateUserRequest, UserChanges, UserListParams, UserListQuery, UserStatus},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_national_id, validate_password_simple};

/// 操作者不能修改自己的角色或停用自己
fn check_self_update(caller_id: Option<i64>, user_id: i64, req: &UpdateUserRequest) -> Result<(), &'static str> {
    if caller_id != Some(user_id) {
        return Ok(());
    }
    if req.role.is_some() {
        return Err("Cannot change the role of the current user");
    }
    if matches!(req.status, Some(status) if status != UserStatus::Active) {
        return Err("Cannot deactivate the current user");
    }
    Ok(())
}

impl UserService {
    pub async fn list_users(
        &self,
        params: UserListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_users_with_pagination(UserListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "User list retrieved successfully",
            ))),
            Err(e) => {
                tracing::error!("Failed to retrieve user list: {}", e);
                Ok(e.to_response())
            }
        }
    }

    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_user_by_id(user_id).await {
            Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                "User information retrieved successfully",
            ))),
            Ok(None) => Ok(user_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_user(
        &self,
        user_id: i64,
        req: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = check_self_update(RequireJWT::extract_user_id(request), user_id, &req) {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }
        if let Some(ref email) = req.email
            && let Err(msg) = validate_email(email)
        {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        if let Some(ref national_id) = req.national_id
            && let Err(msg) = validate_national_id(national_id)
        {
            return Ok(bad_request(ErrorCode::ValidationFailed, msg));
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                if let Err(msg) = validate_password_simple(password) {
                    return Ok(bad_request(ErrorCode::PasswordPolicyViolation, msg));
                }
                match hash_password(password) {
                    Ok(hash) => Some(hash),
                    Err(e) => return Ok(e.to_response()),
                }
            }
            None => None,
        };

        let storage = self.get_storage(request);
        if let Some(ref national_id) = req.national_id {
            match storage.national_id_exists(national_id, Some(user_id)).await {
                Ok(true) => {
                    return Ok(bad_request(
                        ErrorCode::NationalIdAlreadyExists,
                        "National ID is already registered",
                    ));
                }
                Ok(false) => {}
                Err(e) => return Ok(e.to_response()),
            }
        }

        let changes = UserChanges {
            email: req.email,
            password_hash,
            role: req.role,
            status: req.status,
            first_name: req.first_name,
            last_name: req.last_name,
            national_id: req.national_id,
            profile_photo: req.profile_photo,
            ..Default::default()
        };

        match storage.update_user(user_id, changes).await {
            Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                "User information updated successfully",
            ))),
            Ok(None) => Ok(user_not_found()),
            Err(e) => {
                tracing::error!("Failed to update user {}: {}", user_id, e);
                Ok(e.to_response())
            }
        }
    }

    /// 删除账号，档案随外键级联删除
    pub async fn delete_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        if RequireJWT::extract_user_id(request) == Some(user_id) {
            return Ok(bad_request(
                ErrorCode::CanNotDeleteCurrentUser,
                "Cannot delete current user",
            ));
        }

        match self.get_storage(request).delete_user(user_id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("User deleted successfully"))),
            Ok(false) => Ok(user_not_found()),
            Err(e) => {
                tracing::error!("User deletion failed: {}", e);
                Ok(e.to_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::UserRole;

    #[test]
    fn test_self_update_guards() {
        let demote = UpdateUserRequest {
            role: Some(UserRole::Teacher),
            ..Default::default()
        };
        assert!(check_self_update(Some(1), 1, &demote).is_err());
        assert!(check_self_update(Some(1), 2, &demote).is_ok());

        let deactivate = UpdateUserRequest {
            status: Some(UserStatus::Suspended),
            ..Default::default()
        };
        assert_eq!(
            check_self_update(Some(3), 3, &deactivate).unwrap_err(),
            "Cannot deactivate the current user"
        );

        let rename = UpdateUserRequest {
            first_name: Some("Almaz".to_string()),
            ..Default::default()
        };
        assert!(check_self_update(Some(3), 3, &rename).is_ok());
    }
}
