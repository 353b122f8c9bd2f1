use serde::{Deserialize, Serialize};

use crate::models::admins::entities::Admin;
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;

// 登录主体类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Admin,   // 平台管理员
    Teacher, // 教师
    Student, // 学生
}

impl ActorKind {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";
}

impl<'de> Deserialize<'de> for ActorKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            ActorKind::ADMIN => Ok(ActorKind::Admin),
            ActorKind::TEACHER => Ok(ActorKind::Teacher),
            ActorKind::STUDENT => Ok(ActorKind::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的主体类型: '{s}'. 支持的类型: admin, teacher, student"
            ))),
        }
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorKind::Admin => write!(f, "{}", ActorKind::ADMIN),
            ActorKind::Teacher => write!(f, "{}", ActorKind::TEACHER),
            ActorKind::Student => write!(f, "{}", ActorKind::STUDENT),
        }
    }
}

impl std::str::FromStr for ActorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(ActorKind::Admin),
            "teacher" => Ok(ActorKind::Teacher),
            "student" => Ok(ActorKind::Student),
            _ => Err(format!("Invalid actor kind: {s}")),
        }
    }
}

// 已认证的登录主体，由 JWT 中间件写入请求扩展
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Actor {
    Admin(Admin),
    Teacher(Teacher),
    Student(Student),
}

impl Actor {
    pub fn id(&self) -> i64 {
        match self {
            Actor::Admin(a) => a.id,
            Actor::Teacher(t) => t.id,
            Actor::Student(s) => s.id,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Admin(_) => ActorKind::Admin,
            Actor::Teacher(_) => ActorKind::Teacher,
            Actor::Student(_) => ActorKind::Student,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Actor::Admin(a) => &a.username,
            Actor::Teacher(t) => &t.nickname,
            Actor::Student(s) => &s.nickname,
        }
    }

    // 生成访问令牌
    pub async fn generate_access_token(&self) -> String {
        match crate::utils::jwt::JwtUtils::generate_access_token(self.id(), &self.kind().to_string())
        {
            Ok(token) => token,
            Err(e) => {
                // 如果 JWT 生成失败，返回一个简单的 token（不推荐在生产环境中使用）
                tracing::error!("JWT token 生成失败: {}", e);
                format!(
                    "fallback_token_{}_{}",
                    self.id(),
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id(),
            &self.kind().to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}
