use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MembershipService;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::memberships::requests::UpdateQuotaRequest;
use crate::models::memberships::responses::QuotaStatusResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn quota_status(
    service: &MembershipService,
    request: &HttpRequest,
    school_id: i64,
    student_id: i64,
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

    if let Err(resp) = check_quota_view_permission(&actor, school_id, student_id, &storage).await {
        return Ok(resp);
    }

    let enrollment = match storage.get_enrollment(student_id, school_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EnrollmentNotFound,
                "该学生未加入此学校",
            )));
        }
        Err(e) => {
            error!("Failed to get enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching enrollment",
                )),
            );
        }
    };

    let can_ask = match storage.can_ask(student_id, school_id).await {
        Ok(can_ask) => can_ask,
        Err(e) => {
            error!("Failed to evaluate quota: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while evaluating quota",
                )),
            );
        }
    };

    let asks_count = match storage.count_student_asks(student_id, school_id).await {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count asks: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while counting asks",
                )),
            );
        }
    };

    let now = chrono::Utc::now().timestamp();
    let response = QuotaStatusResponse {
        can_ask,
        normal_times: enrollment.normal_times,
        vip_times: enrollment.vip_times,
        vip_expire: enrollment.vip_expire,
        vip_active: enrollment.vip_active(now),
        asks_count,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取额度状态成功")))
}

pub async fn update_quota(
    service: &MembershipService,
    request: &HttpRequest,
    school_id: i64,
    student_id: i64,
    update_data: UpdateQuotaRequest,
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

    if let Some(normal_times) = update_data.normal_times {
        if normal_times < 0 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "普通提问次数不能为负数",
            )));
        }
    }
    if let Some(vip_times) = update_data.vip_times {
        if vip_times < -1 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "会员提问次数只能是 -1 或非负数",
            )));
        }
    }
    if let Some(vip_expire) = update_data.vip_expire {
        if vip_expire < 0 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "会员到期时间不能为负数",
            )));
        }
    }

    if let Err(resp) = check_quota_manage_permission(&actor, school_id, &storage).await {
        return Ok(resp);
    }

    match storage
        .update_enrollment_quota(student_id, school_id, update_data)
        .await
    {
        Ok(Some(enrollment)) => {
            info!(
                "Quota of student {} in school {} updated",
                student_id, school_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment, "额度调整成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "该学生未加入此学校",
        ))),
        Err(e) => {
            error!(
                "Failed to update quota of student {} in school {}: {}",
                student_id, school_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("额度调整失败: {e}"),
                )),
            )
        }
    }
}

// 额度面板：学生看自己，教师需在职，管理员任意
async fn check_quota_view_permission(
    actor: &Actor,
    school_id: i64,
    student_id: i64,
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
        Actor::Student(student) => {
            if student.id == student_id {
                Ok(())
            } else {
                Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能查看自己的额度",
                )))
            }
        }
    }
}

// 充值续费只有平台管理员和校管理员能做
async fn check_quota_manage_permission(
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
                "只有校管理员可以调整额度",
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
            "学生不能调整额度",
        ))),
    }
}
