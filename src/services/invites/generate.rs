use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::InviteService;
use crate::config::AppConfig;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::invites::requests::GenerateInvitesRequest;
use crate::models::invites::responses::GenerateInvitesResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn generate_codes(
    service: &InviteService,
    request: &HttpRequest,
    school_id: i64,
    generate_data: GenerateInvitesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let actor = match RequireJWT::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    if generate_data.count == 0 || generate_data.count > config.invite.max_batch {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("单次生成数量只能在 1 到 {} 之间", config.invite.max_batch),
        )));
    }

    if let Err(resp) = check_invite_manage_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage
        .generate_invite_codes(school_id, generate_data.count)
        .await
    {
        Ok(codes) => {
            info!(
                "Generated {} invite codes for school {}",
                codes.len(),
                school_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                GenerateInvitesResponse { codes },
                "邀请码生成成功",
            )))
        }
        Err(AskSystemError::QuotaConflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::QuotaConflict, msg))),
        Err(AskSystemError::NotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::SchoolNotFound, msg)))
        }
        Err(e) => {
            error!("Invite code generation failed for school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("邀请码生成失败: {e}"),
                )),
            )
        }
    }
}

// 平台管理员或校管理员才能签发邀请码，停用的学校拒绝签发
async fn check_invite_manage_permission(
    actor: &Actor,
    school_id: i64,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    let school = match storage.get_school_by_id(school_id).await {
        Ok(Some(school)) => school,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SchoolNotFound,
                "学校不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get school {}: {}", school_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching school",
                )),
            );
        }
    };

    if school.disabled {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SchoolDisabled,
            "学校已停用",
        )));
    }

    match actor {
        Actor::Admin(_) => Ok(()),
        Actor::Teacher(teacher) => match storage.is_school_admin(teacher.id, school_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolPermissionDenied,
                "只有校管理员可以管理邀请码",
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
            "学生不能管理邀请码",
        ))),
    }
}
