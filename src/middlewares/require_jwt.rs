/*!
 * JWT 认证中间件
 *
 * 验证 Authorization 头中的 access token，解析出登录主体
 * （管理员 / 教师 / 学生）并写入请求扩展，供后续处理程序使用。
 *
 * ## 使用方法
 *
 * 1. 在路由上应用中间件：
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 应用JWT验证中间件
 *                 .route("/protected", web::get().to(protected_handler))
 *         )
 * })
 * ```
 *
 * 2. 在处理程序中提取主体信息：
 * ```rust,ignore
 * use actix_web::{HttpRequest, HttpResponse, Result};
 * use crate::middlewares::require_jwt::RequireJWT;
 *
 * async fn protected_handler(req: HttpRequest) -> Result<HttpResponse> {
 *     if let Some(actor) = RequireJWT::extract_actor(&req) {
 *         return Ok(HttpResponse::Ok().json(format!("你好, {}", actor.display_name())));
 *     }
 *     Ok(HttpResponse::InternalServerError().finish())
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件验证令牌签名与有效期
 * 3. 按 claims.role 去对应的表加载主体（优先走缓存）
 * 4. 令牌无效、主体不存在或学生账号被禁用时返回 401
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::auth::entities::{Actor, ActorKind};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
            .finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                message,
            )),
    }
}

// 辅助函数：按 claims 中的角色去对应的表加载主体
async fn load_actor(
    storage: &Arc<dyn Storage>,
    kind: ActorKind,
    actor_id: i64,
) -> Result<Actor, String> {
    match kind {
        ActorKind::Admin => {
            let admin = storage
                .get_admin_by_id(actor_id)
                .await
                .map_err(|_| "Failed to retrieve admin from storage".to_string())?
                .ok_or_else(|| "Admin not found".to_string())?;
            Ok(Actor::Admin(admin))
        }
        ActorKind::Teacher => {
            let teacher = storage
                .get_teacher_by_id(actor_id)
                .await
                .map_err(|_| "Failed to retrieve teacher from storage".to_string())?
                .ok_or_else(|| "Teacher not found".to_string())?;
            Ok(Actor::Teacher(teacher))
        }
        ActorKind::Student => {
            let student = storage
                .get_student_by_id(actor_id)
                .await
                .map_err(|_| "Failed to retrieve student from storage".to_string())?
                .ok_or_else(|| "Student not found".to_string())?;

            if student.disabled {
                return Err("Student account is disabled".to_string());
            }

            Ok(Actor::Student(student))
        }
    }
}

// 辅助函数：提取并验证 JWT access token，解析出登录主体
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<Actor, String> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = crate::utils::jwt::JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid JWT token".to_string()
    })?;

    let cache = req
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .ok_or_else(|| "Cache not found in app data".to_string())?
        .get_ref()
        .clone();

    // 从缓存中获取主体信息
    match cache.get_raw(&format!("actor:{token}")).await {
        CacheResult::Found(json) => match serde_json::from_str::<Actor>(&json) {
            Ok(actor) => {
                // 禁用的学生即使缓存命中也要拦下
                if let Actor::Student(student) = &actor {
                    if student.disabled {
                        cache.remove(&format!("actor:{token}")).await;
                        return Err("Student account is disabled".to_string());
                    }
                }
                return Ok(actor);
            }
            Err(_) => {
                cache.remove(&format!("actor:{token}")).await;
                info!(
                    "Failed to deserialize actor from cache for token: {}",
                    token
                );
            }
        },
        _ => {
            debug!("Actor not found in cache for token: {}", token);
        }
    };

    let storage = req
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not found in app data".to_string())?
        .get_ref()
        .clone();

    let kind = claims
        .role
        .parse::<ActorKind>()
        .map_err(|_| "Invalid role in JWT".to_string())?;

    let actor_id = claims
        .actor_id()
        .map_err(|_| "Invalid actor ID in JWT".to_string())?;

    let actor = load_actor(&storage, kind, actor_id).await?;

    // 将主体信息存入缓存
    let app_config = AppConfig::get();
    if let Ok(actor_json) = serde_json::to_string(&actor) {
        cache
            .insert_raw(
                format!("actor:{token}"),
                actor_json,
                app_config.cache.default_ttl,
            )
            .await;
    }

    Ok(actor)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, "").map_into_right_body(),
                ));
            }

            // 验证 JWT token 并解析主体
            match extract_and_validate_jwt(&req).await {
                Ok(actor) => {
                    debug!(
                        "JWT authentication successful for {} ID: {}",
                        actor.kind(),
                        actor.id()
                    );
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取主体信息
impl RequireJWT {
    /// 从请求扩展中提取登录主体
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_actor(req: &actix_web::HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().cloned()
    }

    /// 从请求扩展中提取主体ID
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_actor_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Actor>().map(|actor| actor.id())
    }

    /// 从请求扩展中提取主体类型
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_actor_kind(req: &actix_web::HttpRequest) -> Option<ActorKind> {
        req.extensions().get::<Actor>().map(|actor| actor.kind())
    }
}
