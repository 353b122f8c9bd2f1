use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::CourseService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn upsert_course(
    service: &CourseService,
    request: &HttpRequest,
    school_id: i64,
    course_data: CreateCourseRequest,
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

    if course_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "课程名称不能为空",
        )));
    }
    if course_data.normal_times < 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "普通提问次数不能为负数",
        )));
    }
    // -1 表示会员期内不限次数
    if course_data.vip_times < -1 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "会员提问次数只能是 -1 或非负数",
        )));
    }

    if let Err(resp) = check_course_manage_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage.upsert_course(school_id, course_data).await {
        Ok(course) => {
            info!("Course template for school {} saved", school_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "课程模板保存成功")))
        }
        Err(e) => {
            error!("Course upsert failed for school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("课程模板保存失败: {e}"),
                )),
            )
        }
    }
}

// 平台管理员或校管理员才能维护课程模板，停用的学校拒绝修改
async fn check_course_manage_permission(
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
                "只有校管理员可以维护课程模板",
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
            "学生不能维护课程模板",
        ))),
    }
}
