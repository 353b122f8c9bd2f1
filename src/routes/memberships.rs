use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::ActorKind;
use crate::models::memberships::requests::{
    EnrollStudentRequest, MembershipQueryParams, UpdateQuotaRequest,
};
use crate::models::schools::requests::SchoolQueryParams;
use crate::services::MembershipService;
use crate::utils::{SafeSchoolIdI64, SafeStudentIdI64, SafeTeacherIdI64};

// 懒加载的全局 MembershipService 实例
static MEMBERSHIP_SERVICE: Lazy<MembershipService> = Lazy::new(MembershipService::new_lazy);

// HTTP处理程序
pub async fn list_school_teachers(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    query: web::Query<MembershipQueryParams>,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .list_school_teachers(&req, school_id.0, query.into_inner())
        .await
}

pub async fn dismiss_teacher(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    teacher_id: SafeTeacherIdI64,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .dismiss_teacher(&req, school_id.0, teacher_id.0)
        .await
}

pub async fn list_school_students(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    query: web::Query<MembershipQueryParams>,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .list_school_students(&req, school_id.0, query.into_inner())
        .await
}

pub async fn enroll_student(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    enroll_data: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .enroll_student(&req, school_id.0, enroll_data.into_inner())
        .await
}

pub async fn quota_status(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .quota_status(&req, school_id.0, student_id.0)
        .await
}

pub async fn update_quota(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateQuotaRequest>,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE
        .update_quota(&req, school_id.0, student_id.0, update_data.into_inner())
        .await
}

pub async fn my_schools(
    req: HttpRequest,
    query: web::Query<SchoolQueryParams>,
) -> ActixResult<HttpResponse> {
    MEMBERSHIP_SERVICE.my_schools(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_memberships_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools/{school_id}/teachers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::get()
                        .to(list_school_teachers)
                        // 名册只对教师和管理员开放
                        .wrap(middlewares::RequireActor::new_any(&[
                            ActorKind::Teacher,
                            ActorKind::Admin,
                        ])),
                ),
            )
            .service(
                web::resource("/{teacher_id}").route(
                    web::delete()
                        .to(dismiss_teacher)
                        .wrap(middlewares::RequireActor::new_any(&[
                            ActorKind::Teacher,
                            ActorKind::Admin,
                        ])),
                ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/schools/{school_id}/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_school_students)
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Admin,
                            ])),
                    )
                    // 学生自助入学，校管理员与平台管理员可代办，权限在服务层区分
                    .route(web::post().to(enroll_student)),
            )
            .service(
                web::resource("/{student_id}/quota")
                    // 学生查自己的额度，教师和管理员查在校学生的
                    .route(web::get().to(quota_status))
                    .route(
                        web::put()
                            .to(update_quota)
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Admin,
                            ])),
                    ),
            ),
    );
    cfg.service(
        web::scope("/api/v1/my")
            .wrap(middlewares::RequireJWT)
            .route("/schools", web::get().to(my_schools)),
    );
}
