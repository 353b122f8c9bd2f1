use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::InviteService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::invites::requests::BindSchoolRequest;
use crate::models::invites::responses::BindSchoolResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn bind_school(
    service: &InviteService,
    request: &HttpRequest,
    bind_data: BindSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match RequireJWT::extract_actor(request) {
        Some(Actor::Teacher(teacher)) => teacher,
        Some(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "只有教师可以凭邀请码加入学校",
            )));
        }
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing actor",
            )));
        }
    };

    let code = bind_data.code.trim();
    if code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "邀请码不能为空",
        )));
    }

    match storage.consume_invite_code(code, teacher.id).await {
        Ok(school) => {
            info!("Teacher {} joined school {} via invite code", teacher.id, school.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BindSchoolResponse { school },
                "加入学校成功",
            )))
        }
        // 无效或已被使用的邀请码不区分，统一按不存在处理
        Err(AskSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::InviteCodeInvalid, "邀请码无效或已被使用"),
        )),
        Err(AskSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::TeacherAlreadyEmployed, msg),
        )),
        Err(AskSystemError::Forbidden(msg)) => Ok(HttpResponse::Forbidden()
            .json(ApiResponse::error_empty(ErrorCode::SchoolDisabled, msg))),
        Err(e) => {
            error!("Invite code binding failed for teacher {}: {}", teacher.id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("加入学校失败: {e}"),
                )),
            )
        }
    }
}
