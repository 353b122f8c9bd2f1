use serde::Deserialize;

// 提交回答请求
//
// 文字、语音、图片至少要有一种内容。
#[derive(Debug, Deserialize)]
pub struct CreateAnswerRequest {
    pub answer_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    #[serde(default)]
    pub img_ids: Vec<i64>,
}
