use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::users::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(new_access_token) => {
            let response = RefreshTokenResponse {
                access_token: new_access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };
    let storage = service.get_storage(request);

    let mut info = UserInfoResponse {
        user,
        student_profile: None,
        staff_profile: None,
        teacher_profile: None,
    };

    // 按角色附加档案
    let user_id = info.user.id;
    let attached = match info.user.role {
        UserRole::Student => storage
            .get_student_by_user_id(user_id)
            .await
            .map(|p| info.student_profile = p),
        role => {
            let staff = storage
                .get_staff_by_user_id(user_id)
                .await
                .map(|p| info.staff_profile = p);
            match (staff, UserRole::teacher_roles().contains(&&role)) {
                (Ok(()), true) => storage
                    .get_teacher_by_user_id(user_id)
                    .await
                    .map(|p| info.teacher_profile = p),
                (result, _) => result,
            }
        }
    };

    match attached {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            info,
            "User information retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to load profile of user {}: {}", user_id, e);
            Ok(e.to_response())
        }
    }
}
