use serde::{Deserialize, Serialize};

// 教师实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub nickname: String,
    pub realname: Option<String>,
    pub intro: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub telephone: String,
    pub gender: i32,
    pub wx_openid: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
