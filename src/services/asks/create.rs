use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AskService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::asks::requests::CreateAskRequest;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

const MAX_IMAGES_PER_ASK: usize = 9;

pub async fn create_ask(
    service: &AskService,
    request: &HttpRequest,
    ask_data: CreateAskRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_actor(request) {
        Some(Actor::Student(student)) => student,
        Some(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有学生可以提问",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    let has_text = ask_data
        .ask_text
        .as_deref()
        .is_some_and(|text| !text.trim().is_empty());
    let has_voice = ask_data
        .voice_url
        .as_deref()
        .is_some_and(|url| !url.trim().is_empty());
    if !has_text && !has_voice && ask_data.img_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "文字、语音、图片至少要有一种内容",
        )));
    }

    if ask_data.voice_duration.is_some_and(|duration| duration < 0) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "语音时长不能为负数",
        )));
    }

    if ask_data.img_ids.len() > MAX_IMAGES_PER_ASK {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("一次提问最多附 {MAX_IMAGES_PER_ASK} 张图片"),
        )));
    }

    match storage.get_school_by_id(ask_data.school_id).await {
        Ok(Some(school)) if school.disabled => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolDisabled,
                "学校已停用",
            )));
        }
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SchoolNotFound,
                "学校不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get school {}: {}", ask_data.school_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching school",
                )),
            );
        }
    }

    match storage.create_ask(student.id, ask_data).await {
        Ok(ask) => {
            info!("Student {} created ask {}", student.id, ask.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(ask, "提问成功")))
        }
        Err(AskSystemError::Forbidden(msg)) => {
            Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg)))
        }
        Err(AskSystemError::QuotaExceeded(msg)) => Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::QuotaExceeded, msg))),
        // 引用了未登记的图片
        Err(AskSystemError::Validation(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::TopicImageNotFound, msg))),
        Err(e) => {
            error!("Failed to create ask for student {}: {}", student.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("提问失败: {e}"),
                )),
            )
        }
    }
}
