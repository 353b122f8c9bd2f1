use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::entities::ActorKind;
use crate::models::images::requests::RegisterImageRequest;
use crate::services::ImageService;
use crate::utils::SafeImageIdI64;

// 懒加载的全局 ImageService 实例
static IMAGE_SERVICE: Lazy<ImageService> = Lazy::new(ImageService::new_lazy);

// HTTP处理程序
pub async fn register_image(
    req: HttpRequest,
    image_data: web::Json<RegisterImageRequest>,
) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE
        .register_image(&req, image_data.into_inner())
        .await
}

pub async fn get_image(req: HttpRequest, image_id: SafeImageIdI64) -> ActixResult<HttpResponse> {
    IMAGE_SERVICE.get_image(&req, image_id.0).await
}

// 配置路由
pub fn configure_images_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/images")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(register_image)
                        // 图片批量登记限频
                        .wrap(middlewares::RateLimit::image_upload())
                        .wrap(middlewares::RequireActor::new_any(&[
                            ActorKind::Teacher,
                            ActorKind::Student,
                        ])),
                ),
            )
            .service(web::resource("/{image_id}").route(web::get().to(get_image))),
    );
}
