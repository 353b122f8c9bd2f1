use serde::Deserialize;

// 创建教师（存储层），password 字段为已加密的哈希
#[derive(Debug, Clone)]
pub struct CreateTeacherRequest {
    pub nickname: String,
    pub telephone: String,
    pub password: String,
    pub email: Option<String>,
}

// 教师资料更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateTeacherRequest {
    pub nickname: Option<String>,
    pub realname: Option<String>,
    pub intro: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub gender: Option<i32>,
}
