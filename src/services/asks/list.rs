use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AskService;
use crate::middlewares::RequireJWT;
use crate::models::asks::requests::{AskListQuery, AskQueryParams};
use crate::models::auth::entities::Actor;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_asks(
    service: &AskService,
    request: &HttpRequest,
    query: AskQueryParams,
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

    let mut list_query = AskListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        school_id: query.school_id,
        student_id: None,
        answered: query.answered,
    };

    match &actor {
        // 管理员可以浏览全部提问
        Actor::Admin(_) => {}
        // 学生只能看到自己的提问
        Actor::Student(student) => {
            list_query.student_id = Some(student.id);
        }
        // 教师走学校答疑队列接口
        Actor::Teacher(_) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "请通过学校答疑队列查看提问",
            )));
        }
    }

    match storage.list_asks_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取提问列表成功"))),
        Err(e) => {
            error!("Failed to list asks: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取提问列表失败: {e}"),
                )),
            )
        }
    }
}

pub async fn school_worklist(
    service: &AskService,
    request: &HttpRequest,
    school_id: i64,
    query: AskQueryParams,
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

    // 答疑队列面向在职教师和管理员
    match &actor {
        Actor::Admin(_) => {}
        Actor::Teacher(teacher) => match storage.is_employed(teacher.id, school_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::SchoolPermissionDenied,
                    "未受雇于该学校",
                )));
            }
            Err(e) => {
                error!("Failed to check employment: {}", e);
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
                ErrorCode::Forbidden,
                "学生不能查看答疑队列",
            )));
        }
    }

    let list_query = AskListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        school_id: Some(school_id),
        student_id: None,
        answered: query.answered,
    };

    match storage.list_asks_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "获取答疑队列成功"))),
        Err(e) => {
            error!("Failed to list asks of school {}: {}", school_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("获取答疑队列失败: {e}"),
                )),
            )
        }
    }
}
