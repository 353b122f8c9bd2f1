//! HTTP 中间件
//!
//! RequireJWT 负责认证并解析登录主体，RequireActor 在其后限制主体类型，
//! RateLimit 独立工作，按 IP 或主体 ID 限流。

pub mod rate_limit;
pub mod require_actor;
pub mod require_jwt;

pub use rate_limit::RateLimit;
pub use require_actor::RequireActor;
pub use require_jwt::RequireJWT;

use crate::models::{ApiResponse, ErrorCode};
use actix_web::{HttpResponse, http::StatusCode, http::header::CONTENT_TYPE};

// 辅助函数：创建带业务错误码的 JSON 错误响应
pub(crate) fn create_error_response(
    status: StatusCode,
    code: ErrorCode,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(code, message))
}
