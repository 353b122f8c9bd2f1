use serde::Serialize;

use crate::models::{PaginationInfo, schools::entities::School};

/// 学校列表响应
#[derive(Debug, Serialize)]
pub struct SchoolListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<School>,
}
