use serde::{Deserialize, Serialize};

// 课程实体
//
// normal_times / vip_times 是学生入学时发放的额度模板，
// vip_times 为 -1 表示会员期内不限次数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub intro: Option<String>,
    pub normal_times: i32,
    pub vip_times: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
