use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 成员列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct MembershipQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 学生入学请求
//
// course_id 不填时使用该校最早创建的课程作为额度模板。
#[derive(Debug, Deserialize)]
pub struct EnrollStudentRequest {
    pub student_id: i64,
    pub course_id: Option<i64>,
}

// 额度调整请求（校管理员）
#[derive(Debug, Deserialize)]
pub struct UpdateQuotaRequest {
    pub normal_times: Option<i32>,
    pub vip_times: Option<i32>,
    pub vip_expire: Option<i64>,
}
