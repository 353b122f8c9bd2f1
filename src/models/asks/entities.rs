use serde::{Deserialize, Serialize};

// 提问实体
//
// be_answered 始终等于「存在至少一条回答」，由存储层在写入回答的同一事务里维护。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ask {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub ask_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    pub img_ids: Vec<i64>,
    pub be_answered: bool,
    pub answer_grade: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
