pub mod get;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::requests::CreateCourseRequest;
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
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

    // 创建或更新学校的额度模板课程（校管理员）
    pub async fn upsert_course(
        &self,
        request: &HttpRequest,
        school_id: i64,
        course_data: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_course(self, request, school_id, course_data).await
    }

    // 获取学校的额度模板课程
    pub async fn get_course(
        &self,
        request: &HttpRequest,
        school_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_course(self, request, school_id).await
    }
}
