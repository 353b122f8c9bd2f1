use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::ActorKind;
use crate::models::courses::requests::CreateCourseRequest;
use crate::services::CourseService;
use crate::utils::SafeSchoolIdI64;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// HTTP处理程序
pub async fn get_course(req: HttpRequest, school_id: SafeSchoolIdI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, school_id.0).await
}

pub async fn upsert_course(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .upsert_course(&req, school_id.0, course_data.into_inner())
        .await
}

// 配置路由
//
// 每校只有一个额度模板课程，资源不带课程 ID。
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools/{school_id}/course")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 校内成员查看入学额度模板
                    .route(web::get().to(get_course))
                    .route(
                        web::put()
                            .to(upsert_course)
                            // 校管理员维护模板，平台管理员可以代管
                            .wrap(middlewares::RequireActor::new_any(&[
                                ActorKind::Teacher,
                                ActorKind::Admin,
                            ])),
                    ),
            ),
    );
}
