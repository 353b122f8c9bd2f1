use serde::{Deserialize, Serialize};

// 教师在校任职记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employment {
    pub id: i64,
    pub school_id: i64,
    pub teacher_id: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

// 学生入学记录，携带提问额度状态
//
// vip_expire 是 epoch 秒，0 表示从未开通会员；
// vip_times 为 -1 表示会员期内不限次数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub normal_times: i32,
    pub vip_times: i32,
    pub vip_expire: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

impl Enrollment {
    /// 会员是否在有效期内
    pub fn vip_active(&self, now: i64) -> bool {
        self.vip_expire > now
    }

    /// 当前是否还有可用的提问额度
    pub fn has_quota(&self, now: i64) -> bool {
        if self.vip_active(now) && (self.vip_times == -1 || self.vip_times > 0) {
            return true;
        }
        self.normal_times > 0
    }
}
