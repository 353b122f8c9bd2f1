pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod rate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::asks::requests::{AskQueryParams, CreateAskRequest, RateAnswerRequest};
use crate::storage::Storage;

pub struct AskService {
    storage: Option<Arc<dyn Storage>>,
}

impl AskService {
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

    // 发起提问（学生）
    pub async fn create_ask(
        &self,
        request: &HttpRequest,
        ask_data: CreateAskRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_ask(self, request, ask_data).await
    }

    // 列出提问，学生看自己的，管理员看全部
    pub async fn list_asks(
        &self,
        request: &HttpRequest,
        query: AskQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_asks(self, request, query).await
    }

    // 教师答疑队列：某学校的提问列表
    pub async fn school_worklist(
        &self,
        request: &HttpRequest,
        school_id: i64,
        query: AskQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::school_worklist(self, request, school_id, query).await
    }

    // 提问详情（附图片与全部回答）
    pub async fn get_ask_detail(
        &self,
        request: &HttpRequest,
        ask_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_ask_detail(self, request, ask_id).await
    }

    // 删除提问（提问学生本人）
    pub async fn delete_ask(&self, request: &HttpRequest, ask_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_ask(self, request, ask_id).await
    }

    // 评价回答（提问学生本人）
    pub async fn rate_answer(
        &self,
        request: &HttpRequest,
        ask_id: i64,
        rate_data: RateAnswerRequest,
    ) -> ActixResult<HttpResponse> {
        rate::rate_answer(self, request, ask_id, rate_data).await
    }
}
