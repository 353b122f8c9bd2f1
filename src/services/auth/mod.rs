pub mod login;
pub mod logout;
pub mod profile;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::auth::requests::{
    AdminLoginRequest, StudentRegisterRequest, TeacherRegisterRequest, TelephoneLoginRequest,
    UpdateProfileRequest,
};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 管理员用户名登录
    pub async fn admin_login(
        &self,
        login_request: AdminLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_admin_login(self, login_request, request).await
    }

    // 教师手机号登录
    pub async fn teacher_login(
        &self,
        login_request: TelephoneLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_teacher_login(self, login_request, request).await
    }

    // 学生手机号登录
    pub async fn student_login(
        &self,
        login_request: TelephoneLoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_student_login(self, login_request, request).await
    }

    // 教师注册
    pub async fn register_teacher(
        &self,
        create_request: TeacherRegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_teacher_register(self, create_request, request).await
    }

    // 学生注册
    pub async fn register_student(
        &self,
        create_request: StudentRegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_student_register(self, create_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 验证令牌
    pub async fn verify_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_verify_token(self, request).await
    }

    // 获取当前登录主体信息
    pub async fn get_me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_me(self, request).await
    }

    // 更新当前登录主体的资料
    pub async fn update_profile(
        &self,
        update: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update, request).await
    }

    // 登出，清掉刷新令牌 cookie
    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        logout::handle_logout().await
    }
}
