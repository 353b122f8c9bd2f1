use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SchoolService;
use crate::models::schools::requests::UpdateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_telephone;

pub async fn update_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_id: i64,
    update_data: UpdateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(name) = &update_data.name {
        if name.trim().chars().count() < 3 {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "学校名称至少 3 个字符",
            )));
        }
        // 改名同样不允许与其他学校重名
        match storage.get_school_by_name(name.trim()).await {
            Ok(Some(existing)) if existing.id != school_id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SchoolAlreadyExists,
                    "同名学校已存在",
                )));
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to check school name: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking school name",
                    ),
                ));
            }
        }
    }

    if let Some(telephone) = &update_data.admin_telephone {
        if let Err(msg) = validate_telephone(telephone) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::TelephoneInvalid, msg)));
        }
    }

    match storage.update_school(school_id, update_data).await {
        Ok(Some(school)) => {
            info!("School {} updated successfully", school.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(school, "学校信息更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SchoolNotFound,
            "学校不存在",
        ))),
        Err(e) => {
            error!("School update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("学校信息更新失败: {e}"),
                )),
            )
        }
    }
}
