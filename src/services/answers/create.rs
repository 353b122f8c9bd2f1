use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AnswerService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::answers::entities::AnswerAuthor;
use crate::models::answers::requests::CreateAnswerRequest;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_answer(
    service: &AnswerService,
    request: &HttpRequest,
    ask_id: i64,
    answer_data: CreateAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let author = match RequireJWT::extract_actor(request) {
        Some(Actor::Teacher(teacher)) => AnswerAuthor::Teacher(teacher.id),
        Some(Actor::Student(student)) => AnswerAuthor::Student(student.id),
        Some(Actor::Admin(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "平台管理员不能回答提问",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    let has_text = answer_data
        .answer_text
        .as_deref()
        .is_some_and(|text| !text.trim().is_empty());
    let has_voice = answer_data
        .voice_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if !has_text && !has_voice && answer_data.img_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "文字、语音、图片至少要有一种内容",
        )));
    }

    if answer_data
        .voice_duration
        .is_some_and(|duration| duration < 0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "语音时长不能为负数",
        )));
    }

    match storage.attach_answer(ask_id, author, answer_data).await {
        Ok(answer) => {
            info!("Answer {} attached to ask {}", answer.id, ask_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(answer, "回答成功")))
        }
        Err(AskSystemError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::AskNotFound, msg)))
        }
        // 引用了未登记的图片
        Err(AskSystemError::Validation(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TopicImageNotFound, msg))),
        Err(AskSystemError::Forbidden(msg)) => {
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)))
        }
        Err(AskSystemError::NotAnswered(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::AskNotAnswered, msg))),
        Err(e) => {
            error!("Failed to attach answer to ask {}: {}", ask_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("回答失败: {e}"),
                )),
            )
        }
    }
}
