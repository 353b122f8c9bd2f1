use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SchoolService;
use crate::models::schools::requests::{SchoolListQuery, SchoolQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_schools(
    service: &SchoolService,
    request: &HttpRequest,
    query: SchoolQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = SchoolListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    match storage.list_schools_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取学校列表成功"))),
        Err(e) => {
            error!("Failed to retrieve school list: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取学校列表失败: {e}"),
                )),
            )
        }
    }
}
