use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SchoolService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_school_by_id(school_id).await {
        Ok(Some(school)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(school, "获取学校信息成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "学校不存在",
        ))),
        Err(e) => {
            error!("Failed to retrieve school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取学校信息失败: {e}"),
                )),
            )
        }
    }
}
