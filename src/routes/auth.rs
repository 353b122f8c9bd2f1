use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{
    AdminLoginRequest, StudentRegisterRequest, TeacherRegisterRequest, TelephoneLoginRequest,
    UpdateProfileRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn admin_login(
    req: HttpRequest,
    login_data: web::Json<AdminLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.admin_login(login_data.into_inner(), &req).await
}

pub async fn teacher_login(
    req: HttpRequest,
    login_data: web::Json<TelephoneLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .teacher_login(login_data.into_inner(), &req)
        .await
}

pub async fn student_login(
    req: HttpRequest,
    login_data: web::Json<TelephoneLoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .student_login(login_data.into_inner(), &req)
        .await
}

pub async fn register_teacher(
    req: HttpRequest,
    register_data: web::Json<TeacherRegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .register_teacher(register_data.into_inner(), &req)
        .await
}

pub async fn register_student(
    req: HttpRequest,
    register_data: web::Json<StudentRegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .register_student(register_data.into_inner(), &req)
        .await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn logout(_request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout().await
}

pub async fn verify_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.verify_token(&request).await
}

pub async fn get_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_me(&request).await
}

pub async fn update_profile(
    req: HttpRequest,
    update_data: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .update_profile(update_data.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .route(
                "/admin/login",
                web::post().to(admin_login).wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/teacher/login",
                web::post()
                    .to(teacher_login)
                    .wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/student/login",
                web::post()
                    .to(student_login)
                    .wrap(middlewares::RateLimit::login()),
            )
            .route(
                "/teacher/register",
                web::post()
                    .to(register_teacher)
                    .wrap(middlewares::RateLimit::register()),
            )
            .route(
                "/student/register",
                web::post()
                    .to(register_student)
                    .wrap(middlewares::RateLimit::register()),
            )
            .route(
                "/refresh",
                web::post()
                    .to(refresh_token)
                    .wrap(middlewares::RateLimit::refresh_token()),
            )
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/verify-token", web::get().to(verify_token))
                    .route("/me", web::get().to(get_me))
                    .route("/me", web::put().to(update_profile)),
            ),
    );
}
