use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::ActorKind;
use crate::models::invites::requests::{BindSchoolRequest, GenerateInvitesRequest};
use crate::services::InviteService;
use crate::utils::SafeSchoolIdI64;

// 懒加载的全局 InviteService 实例
static INVITE_SERVICE: Lazy<InviteService> = Lazy::new(InviteService::new_lazy);

// HTTP处理程序
pub async fn generate_codes(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    generate_data: web::Json<GenerateInvitesRequest>,
) -> ActixResult<HttpResponse> {
    INVITE_SERVICE
        .generate_codes(&req, school_id.0, generate_data.into_inner())
        .await
}

pub async fn list_codes(req: HttpRequest, school_id: SafeSchoolIdI64) -> ActixResult<HttpResponse> {
    INVITE_SERVICE.list_codes(&req, school_id.0).await
}

pub async fn bind_school(
    req: HttpRequest,
    bind_data: web::Json<BindSchoolRequest>,
) -> ActixResult<HttpResponse> {
    INVITE_SERVICE.bind_school(&req, bind_data.into_inner()).await
}

// 配置路由
pub fn configure_invites_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools/{school_id}/invites")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_codes)
                            // 校管理员盘点未使用的邀请码
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Admin,
                            ])),
                    )
                    .route(
                        web::post()
                            .to(generate_codes)
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Admin,
                            ])),
                    ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/invites")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/bind").route(
                    web::post()
                        .to(bind_school)
                        // 绑定接口限频，挡住邀请码枚举
                        .wrap(middlewares::RateLimit::invite_code())
                        .wrap(middlewares::RequireActor::new(ActorKind::Teacher)),
                ),
            ),
    );
}
