use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 发起提问请求
//
// 文字、语音、图片至少要有一种内容。
#[derive(Debug, Deserialize)]
pub struct CreateAskRequest {
    pub school_id: i64,
    pub ask_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    #[serde(default)]
    pub img_ids: Vec<i64>,
}

// 提问列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct AskQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<i64>,
    pub answered: Option<bool>,
}

// 提问列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct AskListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub school_id: Option<i64>,
    pub student_id: Option<i64>,
    pub answered: Option<bool>,
}

// 评价回答请求，grade 取 0/1/2
#[derive(Debug, Deserialize)]
pub struct RateAnswerRequest {
    pub grade: i32,
}
