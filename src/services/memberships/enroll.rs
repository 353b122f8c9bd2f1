use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MembershipService;
use crate::errors::AskSystemError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::Actor;
use crate::models::memberships::requests::EnrollStudentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn enroll_student(
    service: &MembershipService,
    request: &HttpRequest,
    school_id: i64,
    enroll_data: EnrollStudentRequest,
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

    if school.disabled {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::SchoolDisabled,
            "学校已停用",
        )));
    }

    // 管理员和校管理员可以录取任何学生，学生只能办理自己的入学
    match &actor {
        Actor::Admin(_) => {}
        Actor::Teacher(teacher) => match storage.is_school_admin(teacher.id, school_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "只有校管理员可以录取学生",
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
        Actor::Student(student) => {
            if enroll_data.student_id != student.id {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "只能办理自己的入学",
                )));
            }
        }
    }

    match storage.get_student_by_id(enroll_data.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "学生不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get student {}: {}", enroll_data.student_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching student",
                )),
            );
        }
    }

    match storage
        .enroll_student(enroll_data.student_id, school_id, enroll_data.course_id)
        .await
    {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in school {}",
                enroll_data.student_id, school_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "入学成功")))
        }
        Err(AskSystemError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::StudentAlreadyEnrolled, msg))),
        // 学校已在上面确认存在，这里的 NotFound 只剩课程缺失一种来源
        Err(AskSystemError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::CourseNotFound, msg))),
        Err(e) => {
            error!(
                "Failed to enroll student {} in school {}: {}",
                enroll_data.student_id, school_id, e
            );
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("入学失败: {e}"),
                )),
            )
        }
    }
}
