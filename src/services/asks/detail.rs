use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AskService;
use crate::middlewares::RequireJWT;
use crate::models::asks::responses::AskView;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_ask_detail(
    service: &AskService,
    request: &HttpRequest,
    ask_id: i64,
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

    let view = match storage.get_ask_detail(ask_id).await {
        Ok(Some(view)) => view,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AskNotFound,
                "提问不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get ask {}: {}", ask_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取提问详情失败: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = check_ask_view_permission(&actor, &view, &storage).await {
        return Ok(resp);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(view, "获取提问详情成功")))
}

// 详情对提问学生本人、该校在职教师和管理员可见
async fn check_ask_view_permission(
    actor: &Actor,
    view: &AskView,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(teacher) => {
            match storage.is_employed(teacher.id, view.ask.school_id).await {
                Ok(true) => Ok(()),
                Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "未受雇于提问所在学校",
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
            }
        }
        Actor::Student(student) => {
            if student.id == view.ask.student_id {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己的提问",
                )))
            }
        }
    }
}
