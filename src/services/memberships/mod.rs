pub mod dismiss;
pub mod enroll;
pub mod my_schools;
pub mod quota;
pub mod students;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::memberships::requests::{
    EnrollStudentRequest, MembershipQueryParams, UpdateQuotaRequest,
};
use crate::models::schools::requests::SchoolQueryParams;
use crate::storage::Storage;

pub struct MembershipService {
    storage: Option<Arc<dyn Storage>>,
}

impl MembershipService {
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

    // 列出学校的在职教师
    pub async fn list_school_teachers(
        &self,
        request: &HttpRequest,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> ActixResult<HttpResponse> {
        teachers::list_school_teachers(self, request, school_id, query).await
    }

    // 列出学校的在读学生
    pub async fn list_school_students(
        &self,
        request: &HttpRequest,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> ActixResult<HttpResponse> {
        students::list_school_students(self, request, school_id, query).await
    }

    // 列出当前主体所属的学校
    pub async fn my_schools(
        &self,
        request: &HttpRequest,
        query: SchoolQueryParams,
    ) -> ActixResult<HttpResponse> {
        my_schools::my_schools(self, request, query).await
    }

    // 解除教师的雇佣关系（校管理员）
    pub async fn dismiss_teacher(
        &self,
        request: &HttpRequest,
        school_id: i64,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        dismiss::dismiss_teacher(self, request, school_id, teacher_id).await
    }

    // 学生入学
    pub async fn enroll_student(
        &self,
        request: &HttpRequest,
        school_id: i64,
        enroll_data: EnrollStudentRequest,
    ) -> ActixResult<HttpResponse> {
        enroll::enroll_student(self, request, school_id, enroll_data).await
    }

    // 查看学生在校的提问额度状态
    pub async fn quota_status(
        &self,
        request: &HttpRequest,
        school_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        quota::quota_status(self, request, school_id, student_id).await
    }

    // 调整学生在校的提问额度（充值/续费）
    pub async fn update_quota(
        &self,
        request: &HttpRequest,
        school_id: i64,
        student_id: i64,
        update_data: UpdateQuotaRequest,
    ) -> ActixResult<HttpResponse> {
        quota::update_quota(self, request, school_id, student_id, update_data).await
    }
}
