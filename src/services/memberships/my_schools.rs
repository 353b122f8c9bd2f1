use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MembershipService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::schools::requests::{SchoolListQuery, SchoolQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn my_schools(
    service: &MembershipService,
    request: &HttpRequest,
    query: SchoolQueryParams,
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

    let list_query = SchoolListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    // 管理员视角没有"所属学校"，返回全部学校
    let result = match &actor {
        Actor::Admin(_) => storage.list_schools_with_pagination(list_query).await,
        Actor::Teacher(teacher) => {
            storage
                .list_teacher_schools_with_pagination(teacher.id, list_query)
                .await
        }
        Actor::Student(student) => {
            storage
                .list_student_schools_with_pagination(student.id, list_query)
                .await
        }
    };

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取学校列表成功"))),
        Err(e) => {
            error!("Failed to list schools for actor {}: {}", actor.id(), e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取学校列表失败: {e}"),
                )),
            )
        }
    }
}
