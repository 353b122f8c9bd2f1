use serde::Deserialize;

// 创建学生（存储层），password 字段为已加密的哈希。
// 微信注册的学生可以没有手机号和密码，但两者不能同时缺失。
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub nickname: String,
    pub telephone: Option<String>,
    pub password: Option<String>,
    pub wx_openid: Option<String>,
    pub from_where: Option<String>,
}

// 学生资料更新请求
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub nickname: Option<String>,
    pub realname: Option<String>,
    pub avatar_url: Option<String>,
    pub from_where: Option<String>,
}
