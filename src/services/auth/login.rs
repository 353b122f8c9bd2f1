use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        entities::Actor,
        requests::{AdminLoginRequest, TelephoneLoginRequest},
        responses::LoginResponse,
    },
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_admin_login(
    service: &AuthService,
    login_request: AdminLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名获取管理员
    match storage.get_admin_by_username(&login_request.username).await {
        Ok(Some(admin)) => {
            // 2. 验证密码
            if verify_password(&login_request.password, &admin.password_hash) {
                issue_tokens(service, Actor::Admin(admin), login_request.remember_me).await
            } else {
                Ok(auth_failed_response())
            }
        }
        Ok(None) => Ok(auth_failed_response()),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}

pub async fn handle_teacher_login(
    service: &AuthService,
    login_request: TelephoneLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .get_teacher_by_telephone(&login_request.telephone)
        .await
    {
        Ok(Some(teacher)) => {
            if verify_password(&login_request.password, &teacher.password_hash) {
                issue_tokens(service, Actor::Teacher(teacher), login_request.remember_me).await
            } else {
                Ok(auth_failed_response())
            }
        }
        Ok(None) => Ok(auth_failed_response()),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}

pub async fn handle_student_login(
    service: &AuthService,
    login_request: TelephoneLoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .get_student_by_telephone(&login_request.telephone)
        .await
    {
        Ok(Some(student)) => {
            if student.disabled {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::UserDisabled,
                    "账号已被禁用",
                )));
            }

            // 微信注册的学生可能没有设置密码，不能走手机号登录
            let verified = student
                .password_hash
                .as_deref()
                .map(|hash| verify_password(&login_request.password, hash))
                .unwrap_or(false);

            if verified {
                issue_tokens(service, Actor::Student(student), login_request.remember_me).await
            } else {
                Ok(auth_failed_response())
            }
        }
        Ok(None) => Ok(auth_failed_response()),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}

// 统一的凭证错误响应，不区分账号不存在和密码错误
fn auth_failed_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "账号或密码错误",
    ))
}

// 生成令牌对并构造登录响应
async fn issue_tokens(
    service: &AuthService,
    actor: Actor,
    remember_me: bool,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    match actor
        .generate_token_pair(
            remember_me
                .then(|| chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)),
        )
        .await
    {
        Ok(token_pair) => {
            tracing::info!(
                "{} {} logged in successfully",
                actor.kind(),
                actor.display_name()
            );

            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                actor,
                created_at: chrono::Utc::now(),
            };

            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "登录成功")))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}
