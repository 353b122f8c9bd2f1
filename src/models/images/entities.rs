use serde::{Deserialize, Serialize};

// 图片上传者类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UploaderKind {
    Teacher, // 教师
    Student, // 学生
}

impl UploaderKind {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
}

impl<'de> Deserialize<'de> for UploaderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UploaderKind::TEACHER => Ok(UploaderKind::Teacher),
            UploaderKind::STUDENT => Ok(UploaderKind::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的上传者类型: '{s}'. 支持的类型: teacher, student"
            ))),
        }
    }
}

impl std::fmt::Display for UploaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploaderKind::Teacher => write!(f, "{}", UploaderKind::TEACHER),
            UploaderKind::Student => write!(f, "{}", UploaderKind::STUDENT),
        }
    }
}

impl std::str::FromStr for UploaderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "teacher" => Ok(UploaderKind::Teacher),
            "student" => Ok(UploaderKind::Student),
            _ => Err(format!("Invalid uploader kind: {s}")),
        }
    }
}

// 题目图片实体
//
// 只登记已上传完成的图片 URL，二进制上传由外部对象存储负责。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicImage {
    pub id: i64,
    pub img_url: String,
    pub uploader_kind: UploaderKind,
    pub uploader_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
