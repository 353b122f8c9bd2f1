use serde::{Deserialize, Serialize};

// 学校实体
//
// admin_telephone 指向校管理员（教师）的手机号，入驻时由平台管理员登记。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub intro: Option<String>,
    pub admin_telephone: String,
    pub disabled: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
