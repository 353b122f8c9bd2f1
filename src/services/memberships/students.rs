use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::MembershipService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::memberships::requests::MembershipQueryParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn list_school_students(
    service: &MembershipService,
    request: &HttpRequest,
    school_id: i64,
    query: MembershipQueryParams,
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

    if let Err(resp) = check_student_roster_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage
        .list_school_students_with_pagination(school_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取学生列表成功"))),
        Err(e) => {
            error!("Failed to list students of school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取学生列表失败: {e}"),
                )),
            )
        }
    }
}

// 学生名册带着额度信息，只对管理员和在职教师开放
async fn check_student_roster_permission(
    actor: &Actor,
    school_id: i64,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(teacher) => match storage.is_employed(teacher.id, school_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolPermissionDenied,
                "未受雇于该学校",
            ))),
            Err(e) => {
                error!("Failed to check employment: {}", e);
                Err(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking permission",
                    )),
                )
            }
        },
        Actor::Student(_) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SchoolPermissionDenied,
            "学生不能查看在校名册",
        ))),
    }
}
