use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::asks::requests::{AskQueryParams, CreateAskRequest, RateAnswerRequest};
use crate::models::auth::entities::ActorKind;
use crate::services::AskService;
use crate::utils::{SafeAskIdI64, SafeSchoolIdI64};

// 懒加载的全局 AskService 实例
static ASK_SERVICE: Lazy<AskService> = Lazy::new(AskService::new_lazy);

// HTTP处理程序
pub async fn create_ask(
    req: HttpRequest,
    ask_data: web::Json<CreateAskRequest>,
) -> ActixResult<HttpResponse> {
    ASK_SERVICE.create_ask(&req, ask_data.into_inner()).await
}

pub async fn list_asks(
    req: HttpRequest,
    query: web::Query<AskQueryParams>,
) -> ActixResult<HttpResponse> {
    ASK_SERVICE.list_asks(&req, query.into_inner()).await
}

pub async fn school_worklist(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    query: web::Query<AskQueryParams>,
) -> ActixResult<HttpResponse> {
    ASK_SERVICE
        .school_worklist(&req, school_id.0, query.into_inner())
        .await
}

pub async fn get_ask_detail(req: HttpRequest, ask_id: SafeAskIdI64) -> ActixResult<HttpResponse> {
    ASK_SERVICE.get_ask_detail(&req, ask_id.0).await
}

pub async fn delete_ask(req: HttpRequest, ask_id: SafeAskIdI64) -> ActixResult<HttpResponse> {
    ASK_SERVICE.delete_ask(&req, ask_id.0).await
}

pub async fn rate_answer(
    req: HttpRequest,
    ask_id: SafeAskIdI64,
    rate_data: web::Json<RateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ASK_SERVICE
        .rate_answer(&req, ask_id.0, rate_data.into_inner())
        .await
}

// 配置路由
pub fn configure_asks_routes(cfg: &mut web::ServiceConfig) {
    // 教师答疑队列挂在学校资源下
    cfg.service(
        web::scope("/api/v1/schools/{school_id}/asks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(school_worklist)
                        .wrap(middlewares::RequireActor::new_any(&[
                            ActorKind::Teacher,
                            ActorKind::Admin,
                        ])),
                ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/asks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 学生看自己的提问，管理员看全部
                    .route(web::get().to(list_asks))
                    .route(
                        web::post()
                            .to(create_ask)
                            .wrap(middlewares::RequireActor::new(ActorKind::Student)),
                    ),
            )
            .service(
                web::resource("/{ask_id}")
                    .route(web::get().to(get_ask_detail))
                    .route(
                        web::delete()
                            .to(delete_ask)
                            .wrap(middlewares::RequireActor::new(ActorKind::Student)),
                    ),
            )
            .service(
                web::resource("/{ask_id}/rate").route(
                    web::post()
                        .to(rate_answer)
                        .wrap(middlewares::RequireActor::new(ActorKind::Student)),
                ),
            ),
    );
}
