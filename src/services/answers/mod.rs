pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::answers::requests::CreateAnswerRequest;
use crate::storage::Storage;

pub struct AnswerService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnswerService {
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

    // 提交回答（教师）或追问（提问学生本人）
    pub async fn create_answer(
        &self,
        request: &HttpRequest,
        ask_id: i64,
        answer_data: CreateAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_answer(self, request, ask_id, answer_data).await
    }

    // 列出提问下的全部回答
    pub async fn list_answers(
        &self,
        request: &HttpRequest,
        ask_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_answers(self, request, ask_id).await
    }

    // 删除回答（作者本人）
    pub async fn delete_answer(
        &self,
        request: &HttpRequest,
        ask_id: i64,
        answer_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_answer(self, request, ask_id, answer_id).await
    }
}
