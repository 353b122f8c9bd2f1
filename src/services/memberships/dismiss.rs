use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MembershipService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn dismiss_teacher(
    service: &MembershipService,
    request: &HttpRequest,
    school_id: i64,
    teacher_id: i64,
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

    let school = match storage.get_school_by_id(school_id).await {
        Ok(Some(school)) => school,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SchoolNotFound,
                "学校不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get school {}: {}", school_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching school",
                )),
            );
        }
    };

    match &actor {
        Actor::Admin(_) => {}
        Actor::Teacher(teacher) => match storage.is_school_admin(teacher.id, school_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "只有校管理员可以解雇教师",
                )));
            }
            Err(e) => {
                error!("Failed to check school admin: {}", e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking permission",
                    )),
                );
            }
        },
        Actor::Student(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::SchoolPermissionDenied,
                "学生不能解雇教师",
            )));
        }
    }

    // 校管理员身份由手机号匹配得出，解雇前在调用侧挡下
    let target = match storage.get_teacher_by_id(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "教师不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get teacher {}: {}", teacher_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching teacher",
                )),
            );
        }
    };

    if target.telephone == school.admin_telephone {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "不能解雇校管理员",
        )));
    }

    match storage.dismiss_employment(teacher_id, school_id).await {
        Ok(()) => {
            info!("Teacher {} dismissed from school {}", teacher_id, school_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("解雇成功")))
        }
        Err(AskSystemError::NotFound(_)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::EmploymentNotFound, "该教师未受雇于此学校"),
        )),
        Err(e) => {
            error!(
                "Failed to dismiss teacher {} from school {}: {}",
                teacher_id, school_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("解雇失败: {e}"),
                )),
            )
        }
    }
}
