use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ImageService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::images::entities::UploaderKind;
use crate::models::images::requests::RegisterImageRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn register_image(
    service: &ImageService,
    request: &HttpRequest,
    image_data: RegisterImageRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (uploader_kind, uploader_id) = match RequireJWT::extract_actor(request) {
        Some(Actor::Teacher(teacher)) => (UploaderKind::Teacher, teacher.id),
        Some(Actor::Student(student)) => (UploaderKind::Student, student.id),
        Some(Actor::Admin(_)) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有教师和学生可以登记图片",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    let img_url = image_data.img_url.trim();
    if img_url.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "图片地址不能为空",
        )));
    }
    if !img_url.starts_with("http://") && !img_url.starts_with("https://") {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "图片地址必须是 http(s) URL",
        )));
    }

    match storage
        .register_topic_image(uploader_kind, uploader_id, img_url)
        .await
    {
        Ok(image) => {
            info!("{} {} registered image {}", uploader_kind, uploader_id, image.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(image, "图片登记成功")))
        }
        Err(e) => {
            error!("Failed to register image: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("图片登记失败: {e}"),
                )),
            )
        }
    }
}
