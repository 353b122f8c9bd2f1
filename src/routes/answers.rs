use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::answers::requests::CreateAnswerRequest;
use crate::models::auth::entities::ActorKind;
use crate::services::AnswerService;
use crate::utils::{SafeAnswerIdI64, SafeAskIdI64};

// 懒加载的全局 AnswerService 实例
static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

// HTTP处理程序
pub async fn create_answer(
    req: HttpRequest,
    ask_id: SafeAskIdI64,
    answer_data: web::Json<CreateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .create_answer(&req, ask_id.0, answer_data.into_inner())
        .await
}

pub async fn list_answers(req: HttpRequest, ask_id: SafeAskIdI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.list_answers(&req, ask_id.0).await
}

pub async fn delete_answer(
    req: HttpRequest,
    ask_id: SafeAskIdI64,
    answer_id: SafeAnswerIdI64,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .delete_answer(&req, ask_id.0, answer_id.0)
        .await
}

// 配置路由
pub fn configure_answers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/asks/{ask_id}/answers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_answers))
                    .route(
                        web::post()
                            .to(create_answer)
                            // 教师答疑，提问学生本人追问
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Student,
                            ])),
                    ),
            )
            .service(
                web::resource("/{answer_id}").route(
                    web::delete()
                        .to(delete_answer)
                        .wrap(middlewares::RequireActor::new_any(&[
                            ActorKind::Teacher,
                            ActorKind::Student,
                        ])),
                ),
            ),
    );
}
