use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 学校查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct SchoolQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建学校请求（平台管理员）
#[derive(Debug, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub intro: Option<String>,
    pub admin_telephone: String,
}

// 更新学校请求
#[derive(Debug, Deserialize)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub intro: Option<String>,
    pub admin_telephone: Option<String>,
    pub disabled: Option<bool>,
}

// 学校列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
