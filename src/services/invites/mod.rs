pub mod bind;
pub mod generate;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::invites::requests::{BindSchoolRequest, GenerateInvitesRequest};
use crate::storage::Storage;

pub struct InviteService {
    storage: Option<Arc<dyn Storage>>,
}

impl InviteService {
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

    // 批量生成邀请码（校管理员）
    pub async fn generate_codes(
        &self,
        request: &HttpRequest,
        school_id: i64,
        generate_data: GenerateInvitesRequest,
    ) -> ActixResult<HttpResponse> {
        generate::generate_codes(self, request, school_id, generate_data).await
    }

    // 列出学校未使用的邀请码（校管理员）
    pub async fn list_codes(&self, request: &HttpRequest, school_id: i64) -> ActixResult<HttpResponse> {
        list::list_codes(self, request, school_id).await
    }

    // 教师凭邀请码加入学校
    pub async fn bind_school(
        &self,
        request: &HttpRequest,
        bind_data: BindSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        bind::bind_school(self, request, bind_data).await
    }
}
