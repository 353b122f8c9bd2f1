use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AskService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_ask(
    service: &AskService,
    request: &HttpRequest,
    ask_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_actor(request) {
        Some(Actor::Student(student)) => student,
        Some(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有提问学生本人可以删除提问",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    match storage.delete_ask(ask_id, student.id).await {
        Ok(()) => {
            info!("Student {} deleted ask {}", student.id, ask_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提问已删除")))
        }
        Err(AskSystemError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::AskNotFound, msg)))
        }
        Err(AskSystemError::Forbidden(msg)) => {
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)))
        }
        Err(e) => {
            error!("Failed to delete ask {}: {}", ask_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("删除提问失败: {e}"),
                )),
            )
        }
    }
}
