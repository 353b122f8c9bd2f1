use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::InviteService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn list_codes(
    service: &InviteService,
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

    if let Err(resp) = check_invite_view_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage.list_invite_codes(school_id).await {
        Ok(codes) => Ok(HttpResponse::Ok().json(ApiResponse::success(codes, "获取邀请码列表成功"))),
        Err(e) => {
            error!("Failed to list invite codes for school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取邀请码列表失败: {e}"),
                )),
            )
        }
    }
}

// 查看邀请码同样限平台管理员或校管理员，只读操作不检查停用状态
async fn check_invite_view_permission(
    actor: &Actor,
    school_id: i64,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(teacher) => match storage.is_school_admin(teacher.id, school_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolPermissionDenied,
                "只有校管理员可以查看邀请码",
            ))),
            Err(e) => {
                error!("Failed to check school admin: {}", e);
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
            "学生不能查看邀请码",
        ))),
    }
}
