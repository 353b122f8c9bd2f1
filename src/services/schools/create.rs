use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SchoolService;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_telephone;

pub async fn create_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_data: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校名至少 3 个字符
    if school_data.name.trim().chars().count() < 3 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "学校名称至少 3 个字符",
        )));
    }

    if let Err(msg) = validate_telephone(&school_data.admin_telephone) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TelephoneInvalid, msg)));
    }

    // 校名不允许重复
    match storage.get_school_by_name(school_data.name.trim()).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SchoolAlreadyExists,
                "同名学校已存在",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check school name: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking school name",
                )),
            );
        }
    }

    match storage.create_school(school_data).await {
        Ok(school) => {
            info!("School {} created successfully", school.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(school, "学校创建成功")))
        }
        Err(e) => {
            error!("School creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("学校创建失败: {e}"),
                )),
            )
        }
    }
}
