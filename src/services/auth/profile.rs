use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::middlewares::require_jwt::{bearer_token, user_cache_key};
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::UserChanges;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    if let Some(ref email) = update_data.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 修改密码需要校验当前密码
    let password_hash = match update_data.new_password {
        Some(ref new_password) => {
            // 中间件缓存的用户不含密码哈希，从存储层重新读取
            let stored = match storage.get_user_by_id(current_user.id).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        "User not found",
                    )));
                }
                Err(e) => return Ok(e.to_response()),
            };
            let current = update_data.current_password.as_deref().unwrap_or_default();
            if !verify_password(current, &stored.password_hash) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Current password is incorrect",
                )));
            }
            if let Err(msg) = validate_password_simple(new_password) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::PasswordPolicyViolation,
                    msg,
                )));
            }
            match hash_password(new_password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(e.to_response()),
            }
        }
        None => None,
    };

    // 角色与状态不允许本人修改
    let changes = UserChanges {
        email: update_data.email,
        password_hash,
        first_name: update_data.first_name,
        last_name: update_data.last_name,
        profile_photo: update_data.profile_photo,
        ..Default::default()
    };

    match storage.update_user(current_user.id, changes).await {
        Ok(Some(user)) => {
            // 令牌对应的缓存用户已过期
            if let (Some(cache), Some(token)) = (service.get_cache(request), bearer_token(request))
            {
                cache.remove(&user_cache_key(&token)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Profile updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            tracing::error!("Failed to update profile of user {}: {}", current_user.id, e);
            Ok(e.to_response())
        }
    }
}
