use serde::Serialize;

use crate::models::answers::entities::Answer;
use crate::models::asks::entities::Ask;
use crate::models::images::entities::TopicImage;
use crate::models::PaginationInfo;

/// 带图片的回答视图
#[derive(Debug, Serialize)]
pub struct AnswerView {
    #[serde(flatten)]
    pub answer: Answer,
    pub images: Vec<TopicImage>,
}

/// 提问详情视图，附带图片与全部回答
#[derive(Debug, Serialize)]
pub struct AskView {
    #[serde(flatten)]
    pub ask: Ask,
    pub images: Vec<TopicImage>,
    pub answers: Vec<AnswerView>,
}

/// 提问列表响应
#[derive(Debug, Serialize)]
pub struct AskListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<AskView>,
}
