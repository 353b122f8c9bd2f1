use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    school_id: i64,
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

    if let Err(resp) = check_course_view_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage.get_canonical_course(school_id).await {
        Ok(Some(course)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "获取课程模板成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "学校尚未配置课程模板",
        ))),
        Err(e) => {
            error!("Failed to get course for school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取课程模板失败: {e}"),
                )),
            )
        }
    }
}

// 课程模板对校内成员可见：管理员任意，教师需在职，学生需在读
async fn check_course_view_permission(
    actor: &Actor,
    school_id: i64,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    let allowed = match actor {
        Actor::Admin(_) => Ok(true),
        Actor::Teacher(teacher) => storage.is_employed(teacher.id, school_id).await,
        Actor::Student(student) => storage.is_enrolled(student.id, school_id).await,
    };

    match allowed {
        Ok(true) => Ok(()),
        Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SchoolPermissionDenied,
            "不是该学校的成员",
        ))),
        Err(e) => {
            error!("Failed to check school membership: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking permission",
                )),
            )
        }
    }
}
