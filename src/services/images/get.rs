use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::ImageService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_image(
    service: &ImageService,
    request: &HttpRequest,
    image_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_topic_image_by_id(image_id).await {
        Ok(Some(image)) => Ok(HttpResponse::Ok().json(ApiResponse::success(image, "获取图片成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TopicImageNotFound,
            "图片不存在",
        ))),
        Err(e) => {
            error!("Failed to get image {}: {}", image_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取图片失败: {e}"),
                )),
            )
        }
    }
}
