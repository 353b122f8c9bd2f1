use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{
    ActorInfoResponse, RefreshTokenResponse, TokenVerificationResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn unauthorized_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "未登录或登录已失效",
    ))
}

/// 用 cookie 里的 refresh token 换发新的 access token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized_response());
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(new_access_token) => {
            let config = service.get_config();
            let response = RefreshTokenResponse {
                access_token: new_access_token,
                expires_in: config.jwt.access_token_expiry,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Refresh token failed: {}", e);
            // refresh token 已失效，顺带清掉客户端的 cookie
            let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(ErrorCode::Unauthorized, "登录已过期，请重新登录"),
            ))
        }
    }
}

/// 能走到这里说明 RequireJWT 已放行，token 必然有效
pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_me(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(actor) = RequireJWT::extract_actor(request) else {
        return Ok(unauthorized_response());
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ActorInfoResponse { actor },
        "Actor information retrieved successfully",
    )))
}
