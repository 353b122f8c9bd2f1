use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AnswerService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::answers::entities::AnswerAuthor;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_answer(
    service: &AnswerService,
    request: &HttpRequest,
    ask_id: i64,
    answer_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let requester = match RequireJWT::extract_actor(request) {
        Some(Actor::Teacher(teacher)) => AnswerAuthor::Teacher(teacher.id),
        Some(Actor::Student(student)) => AnswerAuthor::Student(student.id),
        Some(Actor::Admin(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有回答作者本人可以删除回答",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    match storage.remove_answer(ask_id, answer_id, requester).await {
        Ok(()) => {
            info!("Answer {} of ask {} deleted", answer_id, ask_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("回答已删除")))
        }
        Err(AskSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::AnswerNotFound, msg))),
        Err(AskSystemError::Forbidden(msg)) => {
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)))
        }
        Err(e) => {
            error!("Failed to delete answer {} of ask {}: {}", answer_id, ask_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除回答失败: {e}"),
                )),
            )
        }
    }
}
