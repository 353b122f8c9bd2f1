use serde::Deserialize;

// 管理员登录请求
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 教师/学生手机号登录请求
#[derive(Debug, Deserialize)]
pub struct TelephoneLoginRequest {
    /// 手机号
    pub telephone: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 教师注册请求
#[derive(Debug, Deserialize)]
pub struct TeacherRegisterRequest {
    pub nickname: String,
    pub telephone: String,
    pub password: String,
    pub email: Option<String>,
}

// 学生注册请求
#[derive(Debug, Deserialize)]
pub struct StudentRegisterRequest {
    pub nickname: String,
    pub telephone: String,
    pub password: String,
    pub from_where: Option<String>,
}

// 资料更新请求（教师/学生自助修改，字段按主体类型取用）
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub nickname: Option<String>,
    pub realname: Option<String>,
    pub intro: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    pub gender: Option<i32>,
    pub from_where: Option<String>,
}
