use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::auth::responses::ActorInfoResponse;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_email;

use super::AuthService;

pub async fn handle_update_profile(
    service: &AuthService,
    update: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor = match RequireJWT::extract_actor(request) {
        Some(actor) => actor,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "未登录或登录已失效",
            )));
        }
    };

    // 1. 校验公共字段
    if let Some(nickname) = &update.nickname
        && nickname.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "昵称不能为空",
        )));
    }
    if let Some(gender) = update.gender
        && !(0..=2).contains(&gender)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "性别只能是 0、1、2",
        )));
    }
    if let Some(email) = &update.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    // 2. 按主体类型取用各自的字段入库
    match actor {
        Actor::Teacher(teacher) => {
            let update = UpdateTeacherRequest {
                nickname: update.nickname,
                realname: update.realname,
                intro: update.intro,
                avatar_url: update.avatar_url,
                email: update.email,
                gender: update.gender,
            };
            match storage.update_teacher(teacher.id, update).await {
                Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    ActorInfoResponse {
                        actor: Actor::Teacher(updated),
                    },
                    "资料更新成功",
                ))),
                Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "账号不存在",
                ))),
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("更新资料失败: {e}"),
                    )),
                ),
            }
        }
        Actor::Student(student) => {
            let update = UpdateStudentRequest {
                nickname: update.nickname,
                realname: update.realname,
                avatar_url: update.avatar_url,
                from_where: update.from_where,
            };
            match storage.update_student(student.id, update).await {
                Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                    ActorInfoResponse {
                        actor: Actor::Student(updated),
                    },
                    "资料更新成功",
                ))),
                Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "账号不存在",
                ))),
                Err(e) => Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("更新资料失败: {e}"),
                    )),
                ),
            }
        }
        // 管理员无自助资料，账号由部署方维护
        Actor::Admin(_) => Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "管理员账号不支持修改资料",
        ))),
    }
}
