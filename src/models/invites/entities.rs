use serde::{Deserialize, Serialize};

// 邀请码实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteCode {
    pub id: i64,
    pub school_id: i64,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
