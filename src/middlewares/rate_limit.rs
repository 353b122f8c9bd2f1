/*!
 * 速率限制中间件
 *
 * 固定窗口计数：窗口编号直接算进缓存键里，同一主体在同一窗口内的
 * 请求共享一个计数器，窗口翻转后旧键等缓存过期自动回收。
 *
 * 未认证的请求按客户端 IP 计数，已认证的按主体 ID 计数。
 * 超限返回 429，Retry-After 是距当前窗口结束的秒数。
 *
 * 挂在路由上即可：
 *
 * ```rust,ignore
 * web::scope("/api/v1/auth")
 *     .wrap(RateLimit::login())
 *     .route("/login", web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

/// 窗口计数缓存，全部限流器共用
/// 键: 前缀:主体:窗口编号，值: 窗口内请求数
/// 过期时间必须大于任何限流器的窗口长度
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(600))
        .max_capacity(100_000)
        .build()
});

/// 速率限制配置
#[derive(Clone)]
pub struct RateLimit {
    /// 时间窗口内允许的最大请求数
    max_requests: u32,
    /// 时间窗口（秒）
    window_secs: u64,
    /// 限制键前缀（用于区分不同端点）
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    /// 设置限制键前缀
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录端点限制：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册端点限制：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 刷新令牌限制：10次/分钟/IP（防止暴力攻击）
    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 邀请码绑定限制：10次/分钟（防止暴力枚举）
    pub fn invite_code() -> Self {
        Self::new(10, 60).with_prefix("invite_code")
    }

    /// 图片登记限制：20次/分钟/主体
    pub fn image_upload() -> Self {
        Self::new(20, 60).with_prefix("upload")
    }

    /// 通用 API 限制：100次/分钟/主体
    pub fn api() -> Self {
        Self::new(100, 60).with_prefix("api")
    }
}

/// 计算当前时刻所属的窗口编号和距窗口结束的秒数
fn window_bucket(now_secs: u64, window_secs: u64) -> (u64, u64) {
    let window = window_secs.max(1);
    (now_secs / window, window - now_secs % window)
}

/// 从请求中提取客户端 IP
///
/// 安全注意事项：
/// - 如果服务部署在反向代理后面，需要在反向代理中配置正确的 X-Forwarded-For / X-Real-IP 头
/// - 此实现会验证 IP 格式，防止伪造的无效头导致问题
/// - 在不可信网络中直接暴露服务时，攻击者可能伪造转发头来绕过限制
fn extract_client_ip(req: &ServiceRequest) -> String {
    // 连接信息里的真实 IP 最可信，优先使用
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    // X-Forwarded-For 取第一个 IP（最接近客户端的）
    let forwarded_candidate = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim);
    if let Some(ip) = forwarded_candidate
        && is_valid_ip(ip)
    {
        return ip.to_string();
    }

    let real_ip_candidate = req
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim);
    if let Some(ip) = real_ip_candidate
        && is_valid_ip(ip)
    {
        return ip.to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    use std::net::IpAddr;
    ip.parse::<IpAddr>().is_ok()
}

/// 从请求中提取主体 ID（如果已认证）
fn extract_actor_id(req: &ServiceRequest) -> Option<i64> {
    req.extensions().get::<Actor>().map(|actor| actor.id())
}

fn create_rate_limit_response(limit: u32, retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Limit", limit.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "请求过于频繁，请稍后再试",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let RateLimit {
            max_requests,
            window_secs,
            key_prefix,
        } = self.config.clone();

        Box::pin(async move {
            let identifier = extract_actor_id(&req)
                .map(|id| format!("actor:{}", id))
                .unwrap_or_else(|| format!("ip:{}", extract_client_ip(&req)));

            let now = chrono::Utc::now().timestamp().max(0) as u64;
            let (bucket, reset) = window_bucket(now, window_secs);

            let cache_key = if key_prefix.is_empty() {
                format!("{identifier}:{bucket}")
            } else {
                format!("{key_prefix}:{identifier}:{bucket}")
            };

            let current_count = RATE_LIMIT_CACHE.get(&cache_key).await.unwrap_or(0);

            if current_count >= max_requests {
                warn!(
                    "Rate limit exceeded for key: {} (count: {}/{})",
                    cache_key, current_count, max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(max_requests, reset).map_into_right_body(),
                ));
            }

            RATE_LIMIT_CACHE.insert(cache_key, current_count + 1).await;

            let remaining = max_requests.saturating_sub(current_count + 1);
            req.extensions_mut().insert(RateLimitInfo {
                remaining,
                limit: max_requests,
                reset,
            });

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

/// 速率限制信息（可在响应中添加）
#[derive(Clone)]
pub struct RateLimitInfo {
    pub remaining: u32,
    pub limit: u32,
    pub reset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);
        assert_eq!(register.window_secs, 60);

        let invite = RateLimit::invite_code();
        assert_eq!(invite.max_requests, 10);
    }

    #[test]
    fn test_window_bucket_boundaries() {
        // 窗口起点，整个窗口都还在
        assert_eq!(window_bucket(120, 60), (2, 60));
        // 窗口中段
        assert_eq!(window_bucket(130, 60), (2, 50));
        // 最后一秒
        assert_eq!(window_bucket(179, 60), (2, 1));
        // 翻转到下一个窗口
        assert_eq!(window_bucket(180, 60), (3, 60));
        // 窗口长度为 0 时按 1 秒处理，不会除零
        assert_eq!(window_bucket(7, 0), (7, 1));
    }
}
