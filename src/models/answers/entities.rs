use serde::{Deserialize, Serialize};

// 回答作者，经过身份认证后由路由层构造
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerAuthor {
    Teacher(i64),
    Student(i64),
}

impl AnswerAuthor {
    /// 拆分为 (teacher_id, student_id) 二元组，恰有一个为 Some
    pub fn into_columns(self) -> (Option<i64>, Option<i64>) {
        match self {
            AnswerAuthor::Teacher(id) => (Some(id), None),
            AnswerAuthor::Student(id) => (None, Some(id)),
        }
    }
}

// 回答实体
//
// teacher_id 与 student_id 恰有一个非空；学生追问也以回答形式挂在原提问下，
// 且只有在提问已有回答后才允许追问。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub ask_id: i64,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub answer_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    pub img_ids: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
