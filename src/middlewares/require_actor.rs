/*!
 * 基于主体类型的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于限制路由只对
 * 特定类型的登录主体开放。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_actor::RequireActor;
 * use crate::middlewares::require_jwt::RequireJWT;
 * use crate::models::auth::entities::ActorKind;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 先验证JWT
 *                 .service(
 *                     web::scope("/admin")
 *                         .wrap(RequireActor::new(ActorKind::Admin))  // 再验证主体类型
 *                         .route("/schools", web::get().to(admin_schools_handler))
 *                 )
 *         )
 * })
 * ```
 *
 * 或者允许多种主体类型：
 *
 * ```rust,ignore
 * .wrap(RequireActor::new_any(&[ActorKind::Teacher, ActorKind::Student]))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    auth::entities::{Actor, ActorKind},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireActor {
    // 每个主体只有一种类型，命中任一即放行
    allowed_kinds: Vec<ActorKind>,
}

impl RequireActor {
    /// 创建只允许单一主体类型的中间件
    pub fn new(kind: ActorKind) -> Self {
        Self {
            allowed_kinds: vec![kind],
        }
    }

    /// 创建允许任一主体类型的中间件
    pub fn new_any(kinds: &[ActorKind]) -> Self {
        Self {
            allowed_kinds: kinds.to_vec(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireActor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireActorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireActorMiddleware {
            service: Rc::new(service),
            allowed_kinds: self.allowed_kinds.clone(),
        }))
    }
}

pub struct RequireActorMiddleware<S> {
    service: Rc<S>,
    allowed_kinds: Vec<ActorKind>,
}

impl<S, B> Service<ServiceRequest> for RequireActorMiddleware<S>
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
        let allowed_kinds = self.allowed_kinds.clone();

        Box::pin(async move {
            // 从请求扩展中获取登录主体
            let actor = req.extensions().get::<Actor>().cloned();

            match actor {
                Some(actor) => {
                    let has_permission = allowed_kinds.contains(&actor.kind());

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for {} {} to {}. Allowed kinds: {:?}",
                            actor.kind(),
                            actor.id(),
                            req.path(),
                            allowed_kinds
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Actor check failed: No actor found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
