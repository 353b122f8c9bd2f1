use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AnswerService;
use crate::middlewares::RequireJWT;
use crate::models::asks::entities::Ask;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn list_answers(
    service: &AnswerService,
    request: &HttpRequest,
    ask_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match RequireJWT::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    let ask = match storage.get_ask_by_id(ask_id).await {
        Ok(Some(ask)) => ask,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AskNotFound,
                "提问不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get ask {}: {}", ask_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching ask",
                )),
            );
        }
    };

    if let Err(resp) = check_answer_view_permission(&actor, &ask, &storage).await {
        return Ok(resp);
    }

    match storage.list_answers_for_ask(ask_id).await {
        Ok(answers) => Ok(HttpResponse::Ok().json(ApiResponse::success(answers, "获取回答列表成功"))),
        Err(e) => {
            error!("Failed to list answers of ask {}: {}", ask_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取回答列表失败: {e}"),
                )),
            )
        }
    }
}

// 回答与提问详情的可见范围一致
async fn check_answer_view_permission(
    actor: &Actor,
    ask: &Ask,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(teacher) => match storage.is_employed(teacher.id, ask.school_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolPermissionDenied,
                "未受雇于提问所在学校",
            ))),
            Err(e) => {
                error!("Failed to check employment: {}", e);
                Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking permission",
                    )),
                )
            }
        },
        Actor::Student(student) => {
            if student.id == ask.student_id {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己提问下的回答",
                )))
            }
        }
    }
}
