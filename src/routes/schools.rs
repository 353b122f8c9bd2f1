use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::ActorKind;
use crate::models::schools::requests::{
    CreateSchoolRequest, SchoolQueryParams, UpdateSchoolRequest,
};
use crate::services::SchoolService;
use crate::utils::SafeSchoolIdI64;

// 懒加载的全局 SchoolService 实例
static SCHOOL_SERVICE: Lazy<SchoolService> = Lazy::new(SchoolService::new_lazy);

// HTTP处理程序
pub async fn list_schools(
    req: HttpRequest,
    query: web::Query<SchoolQueryParams>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.list_schools(&req, query.into_inner()).await
}

pub async fn create_school(
    req: HttpRequest,
    school_data: web::Json<CreateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .create_school(&req, school_data.into_inner())
        .await
}

pub async fn get_school(req: HttpRequest, school_id: SafeSchoolIdI64) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE.get_school(&req, school_id.0).await
}

pub async fn update_school(
    req: HttpRequest,
    school_id: SafeSchoolIdI64,
    update_data: web::Json<UpdateSchoolRequest>,
) -> ActixResult<HttpResponse> {
    SCHOOL_SERVICE
        .update_school(&req, school_id.0, update_data.into_inner())
        .await
}

// 配置路由
//
// 学校档案只归平台管理员管，校内视角走 /my/schools 和嵌套资源。
pub fn configure_schools_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schools")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_schools)
                            .wrap(middlewares::RequireActor::new(ActorKind::Admin)),
                    )
                    .route(
                        web::post()
                            .to(create_school)
                            .wrap(middlewares::RequireActor::new(ActorKind::Admin)),
                    ),
            )
            .service(
                web::resource("/{school_id}")
                    .route(
                        web::get()
                            .to(get_school)
                            .wrap(middlewares::RequireActor::new(ActorKind::Admin)),
                    )
                    .route(
                        web::put()
                            .to(update_school)
                            .wrap(middlewares::RequireActor::new(ActorKind::Admin)),
                    ),
            ),
    );
}
