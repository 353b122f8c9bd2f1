use serde::{Deserialize, Serialize};

// 学生实体
//
// 微信注册的学生可能没有手机号和密码，telephone 与 wx_openid 至少存在一个。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub nickname: String,
    pub realname: Option<String>,
    pub avatar_url: Option<String>,
    pub from_where: Option<String>,
    pub telephone: Option<String>,
    pub wx_openid: Option<String>,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: Option<String>,
    pub disabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
