//! 数据模型定义
//!
//! 按业务域拆分，每个域下分 entities / requests / responses。
//! common 中是跨域共享的响应包装与分页结构。

pub mod common;

pub mod admins;
pub mod answers;
pub mod asks;
pub mod auth;
pub mod courses;
pub mod images;
pub mod invites;
pub mod memberships;
pub mod schools;
pub mod students;
pub mod teachers;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 程序启动时间，注入 app_data 供运行状态接口使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// code 随 ApiResponse 返回给客户端，与 HTTP 状态码独立。
/// 分段：1xxx 通用，2xxx 认证，3xxx 学校与成员，4xxx 额度，5xxx 问答，6xxx 账号。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,
    Conflict = 1006,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,

    // 学校与成员
    SchoolNotFound = 3000,
    SchoolAlreadyExists = 3001,
    SchoolPermissionDenied = 3002,
    SchoolDisabled = 3003,
    CourseNotFound = 3004,
    InviteCodeInvalid = 3100,
    TeacherAlreadyEmployed = 3101,
    EmploymentNotFound = 3102,
    StudentAlreadyEnrolled = 3103,
    EnrollmentNotFound = 3104,

    // 提问额度
    QuotaExceeded = 4000,
    QuotaConflict = 4001,

    // 问答
    AskNotFound = 5000,
    AskNotAnswered = 5001,
    AnswerNotFound = 5002,
    AnswerGradeInvalid = 5003,
    TopicImageNotFound = 5004,

    // 账号
    UserNotFound = 6000,
    UserAlreadyExists = 6001,
    TelephoneInvalid = 6002,
    PasswordInvalid = 6003,
    UserDisabled = 6004,
}
