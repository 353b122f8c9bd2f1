use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AskService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::asks::requests::RateAnswerRequest;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn rate_answer(
    service: &AskService,
    request: &HttpRequest,
    ask_id: i64,
    rate_data: RateAnswerRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_actor(request) {
        Some(Actor::Student(student)) => student,
        Some(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有提问学生本人可以评价",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    match storage.rate_answer(ask_id, student.id, rate_data.grade).await {
        Ok(ask) => {
            info!("Student {} rated ask {}", student.id, ask_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(ask, "评价成功")))
        }
        Err(AskSystemError::Validation(msg)) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AnswerGradeInvalid, msg))),
        Err(AskSystemError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::AskNotFound, msg)))
        }
        Err(AskSystemError::Forbidden(msg)) => {
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)))
        }
        Err(AskSystemError::NotAnswered(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::AskNotAnswered, msg))),
        Err(e) => {
            error!("Failed to rate ask {}: {}", ask_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("评价失败: {e}"),
                )),
            )
        }
    }
}
