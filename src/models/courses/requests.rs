use serde::Deserialize;

fn default_normal_times() -> i32 {
    5
}

fn default_vip_times() -> i32 {
    -1
}

// 创建课程请求
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub intro: Option<String>,
    #[serde(default = "default_normal_times")]
    pub normal_times: i32,
    #[serde(default = "default_vip_times")]
    pub vip_times: i32,
}
