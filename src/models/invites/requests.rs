use serde::Deserialize;

fn default_count() -> u32 {
    1
}

// 批量生成邀请码请求
#[derive(Debug, Deserialize)]
pub struct GenerateInvitesRequest {
    #[serde(default = "default_count")]
    pub count: u32,
}

// 教师凭邀请码加入学校请求
#[derive(Debug, Deserialize)]
pub struct BindSchoolRequest {
    pub code: String,
}
