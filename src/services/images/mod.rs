pub mod get;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::images::requests::RegisterImageRequest;
use crate::storage::Storage;

pub struct ImageService {
    storage: Option<Arc<dyn Storage>>,
}

impl ImageService {
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

    // 登记已上传的图片（教师或学生）
    pub async fn register_image(
        &self,
        request: &HttpRequest,
        image_data: RegisterImageRequest,
    ) -> ActixResult<HttpResponse> {
        register::register_image(self, request, image_data).await
    }

    // 根据 ID 获取图片
    pub async fn get_image(&self, request: &HttpRequest, image_id: i64) -> ActixResult<HttpResponse> {
        get::get_image(self, request, image_id).await
    }
}
