use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::CreateStudentRequest;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::{StudentRegisterRequest, TeacherRegisterRequest},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_telephone};

use super::AuthService;

pub async fn handle_teacher_register(
    service: &AuthService,
    create_request: TeacherRegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 校验手机号与密码
    if let Err(msg) = validate_telephone(&create_request.telephone) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TelephoneInvalid, msg)));
    }
    if let Err(msg) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }
    if let Some(email) = &create_request.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }
    if create_request.nickname.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "昵称不能为空",
        )));
    }

    // 2. 检查手机号是否已注册
    match storage
        .get_teacher_by_telephone(&create_request.telephone)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "手机号已注册",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    // 3. 哈希密码后入库
    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    let create = CreateTeacherRequest {
        nickname: create_request.nickname,
        telephone: create_request.telephone,
        password: password_hash,
        email: create_request.email,
    };

    match storage.create_teacher(create).await {
        Ok(teacher) => Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "注册成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        ),
    }
}

pub async fn handle_student_register(
    service: &AuthService,
    create_request: StudentRegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_telephone(&create_request.telephone) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TelephoneInvalid, msg)));
    }
    if let Err(msg) = validate_password(&create_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PasswordInvalid, msg)));
    }
    if create_request.nickname.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "昵称不能为空",
        )));
    }

    match storage
        .get_student_by_telephone(&create_request.telephone)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                "手机号已注册",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Register failed: {e}"),
                )),
            );
        }
    }

    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    let create = CreateStudentRequest {
        nickname: create_request.nickname,
        telephone: Some(create_request.telephone),
        password: Some(password_hash),
        wx_openid: None,
        from_where: create_request.from_where,
    };

    match storage.create_student(create).await {
        Ok(student) => Ok(HttpResponse::Created().json(ApiResponse::success(student, "注册成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("注册失败: {e}"),
            )),
        ),
    }
}
